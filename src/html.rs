//! Static HTML export of rendered cards.
//!
//! The markup mirrors the interactive page: one `injector-card` per card, a
//! summary line, pressure tabs as buttons and the offsets table for expanded
//! cards.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::view::CardView;

/// Render a page fragment containing the summary and every card.
pub fn render_page(views: &[CardView], summary: &str) -> String {
    let mut out = String::with_capacity(1024 + views.len() * 512);
    out.push_str("<section class=\"injector-grid\">\n");
    out.push_str(&format!("  <p class=\"summary\">{}</p>\n", encode_text(summary)));
    for view in views {
        write_card(&mut out, view);
    }
    out.push_str("</section>\n");
    out
}

fn write_card(out: &mut String, view: &CardView) {
    let class = if view.duplicate {
        "injector-card duplicate"
    } else {
        "injector-card"
    };
    out.push_str(&format!(
        "  <div class=\"{}\" data-expanded=\"{}\">\n",
        class, view.expanded
    ));
    out.push_str(&format!("    <h3>{}</h3>\n", encode_text(&view.title)));
    if let Some(d) = &view.description {
        out.push_str(&format!(
            "    <p><strong>Description:</strong> {}</p>\n",
            encode_text(d)
        ));
    }
    out.push_str(&format!(
        "    <p><strong>Capacity:</strong> <span class=\"detail\">{}</span></p>\n",
        encode_text(&view.capacity)
    ));
    if let Some(ohm) = &view.impedance {
        out.push_str(&format!(
            "    <p><strong>Impedance:</strong> <span class=\"detail\">{}</span></p>\n",
            encode_text(ohm)
        ));
    }
    if let Some(p) = &view.pressure {
        out.push_str(&format!(
            "    <p><strong>Pressure:</strong> {}</p>\n",
            encode_text(p)
        ));
    }
    if view.duplicate {
        out.push_str("    <p class=\"warning\">Possible duplicate entry</p>\n");
    }
    if !view.tabs.is_empty() {
        out.push_str("    <div class=\"tabs\">");
        for tab in &view.tabs {
            let class = if tab.active { "tab active" } else { "tab" };
            out.push_str(&format!(
                "<button class=\"{}\" title=\"{}\">{}</button>",
                class,
                encode_double_quoted_attribute(&tab.label),
                encode_text(&tab.label)
            ));
        }
        out.push_str("</div>\n");
    }
    if let Some(table) = &view.table {
        out.push_str("    <table title=\"Click to copy the value.\">\n      <tr>");
        for v in &table.voltages {
            out.push_str(&format!("<th>{}</th>", encode_text(v)));
        }
        out.push_str("</tr>\n      <tr>");
        for l in &table.latencies {
            out.push_str(&format!("<td>{}</td>", encode_text(l)));
        }
        out.push_str("</tr>\n    </table>\n");
    }
    out.push_str("  </div>\n");
}
