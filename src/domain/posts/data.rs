use time::macros::datetime;

use super::FixturePost;

pub static FIXTURE_POSTS: [FixturePost; 6] = [
    FixturePost {
        id: 1,
        title: "A Thorough Tour of the Next.js 15 Release",
        slug: "nextjs-15-new-features",
        author: "Human",
        created_at: datetime!(2025-01-10 10:00 UTC),
        content: "Next.js 15 lands with a long list of changes. This post walks through the ones that matter most for day-to-day work.

## Async request APIs

Request-scoped helpers such as `cookies()` and `headers()` now return promises. Most call sites only need an `await`, and a codemod handles the rest.

## Caching defaults

Fetch requests and GET route handlers are no longer cached by default. Opt back in explicitly when a response really is static.

### Client router cache

Page segments are no longer reused from the client router cache on navigation, so users see fresh data without a hard refresh.

## Turbopack in development

`next dev --turbo` is stable. Local startup and fast refresh are noticeably quicker on large apps.

## Wrapping up

Upgrade on a branch, run the codemods, and read the caching section twice.",
    },
    FixturePost {
        id: 2,
        title: "Type-Safe React Development with TypeScript",
        slug: "typescript-react-type-safety",
        author: "AI",
        created_at: datetime!(2025-01-09 15:30 UTC),
        content: "TypeScript pays for itself fastest in component boundaries. Here are the patterns worth adopting first.

## Typing props

Prefer explicit prop interfaces over `React.FC`. Optional props should have defaults at the destructuring site.

```tsx
interface ButtonProps {
  label: string;
  onClick?: () => void;
}
```

## Discriminated unions for state

Model loading, success, and error states as a union with a `status` tag. The compiler then forces every branch to be handled.

### Exhaustiveness checks

A `never` assignment in the default branch turns a forgotten case into a compile error.

## Generic components

Lists and tables benefit from a type parameter for the row type, keeping render callbacks fully typed.",
    },
    FixturePost {
        id: 3,
        title: "Getting Started with Backend Development on Supabase",
        slug: "supabase-backend-development",
        author: "CLI",
        created_at: datetime!(2025-01-08 09:15 UTC),
        content: "Supabase bundles Postgres, auth, storage, and realtime behind one dashboard. This guide covers the first hour.

## Creating a project

Pick a region close to your users and store the database password somewhere safe; you will need it for migrations.

## Designing tables

Start with a `posts` table keyed by UUID with `created_at` and `updated_at` timestamps. Add indexes for the columns you filter on.

## Row level security

Enable RLS on every table before exposing it. Write one policy per operation rather than a catch-all.

### Service role keys

The service role key bypasses RLS. Keep it on the server and in command-line tools, never in the browser.

## Next steps

Wire up the client library and try a first query from a server component.",
    },
    FixturePost {
        id: 4,
        title: "Tailwind CSS Best Practices",
        slug: "tailwind-css-best-practices",
        author: "Human",
        created_at: datetime!(2025-01-07 14:20 UTC),
        content: "Utility-first CSS scales well once a few habits are in place.

## Keep design tokens in the config

Colours, spacing, and fonts belong in the theme so that utilities stay consistent across the codebase.

## Extract components, not classes

When a pattern repeats, extract a component. Reaching for `@apply` too early recreates the problems Tailwind set out to solve.

## Order classes consistently

The official Prettier plugin sorts classes automatically and ends review comments about ordering.

### Responsive variants

Write mobile styles first and layer `md:` and `lg:` variants on top.

## Purge with confidence

Avoid constructing class names dynamically so the compiler can see every class you use.",
    },
    FixturePost {
        id: 5,
        title: "Understanding React Server Components",
        slug: "react-server-components",
        author: "AI",
        created_at: datetime!(2025-01-06 11:00 UTC),
        content: "Server Components change where rendering happens. The mental model is simpler than it first appears.

## What runs where

Server Components render on the server and ship no JavaScript. Client Components are marked with `'use client'` and hydrate in the browser.

## Data fetching

A Server Component can `await` data directly. There is no need for effects or client-side loading states for the initial render.

### Passing data down

Props crossing the server-client boundary must be serialisable. Functions and class instances cannot cross it.

## When to reach for the client

Interactivity, browser APIs, and local state still require Client Components. Keep them small and push them to the leaves of the tree.",
    },
    FixturePost {
        id: 6,
        title: "An Introduction to Building CLI Tools",
        slug: "cli-tool-development",
        author: "CLI",
        created_at: datetime!(2025-01-05 16:45 UTC),
        content: "A good command-line tool is predictable, scriptable, and quiet on success.

## Arguments and flags

Use positional arguments for required inputs and flags for everything optional. Print usage when required input is missing.

## Exit codes

Exit with zero on success and non-zero on any failure so shell scripts can react.

## Configuration

Read credentials from environment variables and fail fast with a clear message when one is missing.

### Reading files

Report the path that failed to load; a bare \"no such file\" message wastes the user's time.

## Output

Print only what the user asked for on stdout and send diagnostics to stderr.",
    },
];
