use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap text-sm font-medium transition-all duration-300 disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-5 shrink-0 [&_svg]:shrink-0 outline-none focus-visible:ring-2 focus-visible:ring-offset-2 hover:cursor-pointer active:scale-[0.98] touch-manipulation select-none",
        variants: {
            variant: {
                Default: "rounded-lg bg-purple-600 text-white shadow-md hover:bg-purple-700 hover:shadow-lg",
                Outline: "rounded-lg border border-gray-300 bg-transparent hover:bg-gray-100",
                Ghost: "rounded-full hover:bg-black/10",
            },
            size: {
                Default: "h-10 px-4 py-2",
                Lg: "h-12 px-6 text-base",
                Icon: "p-2",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
