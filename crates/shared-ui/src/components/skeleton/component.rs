use dioxus::prelude::*;

/// Loading placeholder block with an animated pulse.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    let base = vec![Attribute::new("class", "ui-skeleton", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
        }
    }
}

/// A `rows` x `columns` grid of small skeleton blocks, rendered as table rows
/// so it can sit inside a table body while the first page loads.
#[component]
pub fn SkeletonRows(rows: usize, columns: usize) -> Element {
    rsx! {
        for row in 0..rows {
            tr { key: "{row}", class: "ui-skeleton-row",
                for col in 0..columns {
                    td { key: "{col}",
                        div { class: "ui-skeleton-cell",
                            Skeleton {}
                        }
                    }
                }
            }
        }
    }
}
