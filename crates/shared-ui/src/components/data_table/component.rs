use dioxus::prelude::*;

/// Scrollable table wrapper with co-located styles.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "ui-data-table",
            table {
                {children}
            }
        }
    }
}

/// Wraps `th` cells in a `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

#[component]
pub fn DataTableColumn(children: Element) -> Element {
    rsx! {
        th { {children} }
    }
}

/// Table row. A `dimmed` row is drawn at reduced opacity, used for rows
/// that stand in for data still loading.
#[component]
pub fn DataTableRow(#[props(default = false)] dimmed: bool, children: Element) -> Element {
    rsx! {
        tr {
            class: "ui-data-table-row",
            "data-dimmed": if dimmed { "true" } else { "false" },
            {children}
        }
    }
}

/// Table data cell. `muted` renders placeholder text in the dim color.
#[component]
pub fn DataTableCell(#[props(default = false)] muted: bool, children: Element) -> Element {
    rsx! {
        td {
            class: if muted { "ui-data-table-cell muted" } else { "ui-data-table-cell" },
            {children}
        }
    }
}
