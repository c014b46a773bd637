use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "flex flex-col gap-4 rounded-2xl bg-white text-gray-800 shadow-xl p-8"}
    clx! {CardHeader, div, "flex flex-col items-center gap-1.5"}
    clx! {CardTitle, h2, "text-3xl font-bold text-center"}
    clx! {CardContent, div, "flex flex-col gap-4"}
    clx! {CardDescription, p, "text-sm text-gray-500 text-center"}
    clx! {CardFooter, footer, "flex items-center justify-center text-sm", "gap-2"}

    // Catalog tile on the countries grid.
    clx! {CountryTile, div, "relative flex flex-col overflow-hidden rounded-xl bg-white shadow-md transition-all duration-300 hover:-translate-y-1 hover:shadow-xl cursor-pointer"}
    // Sticky note on the notes board.
    clx! {NoteTile, div, "relative flex min-h-[180px] flex-col gap-2 rounded-xl border-2 p-4 shadow-sm transition-shadow hover:shadow-md"}
}

pub use components::*;
