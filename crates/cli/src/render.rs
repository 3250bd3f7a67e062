//! Terminal rendering of search views — the CLI's memory card.

use memora_core::{ResultCard, View};

/// Longest title shown before truncation.
const TITLE_WIDTH: usize = 56;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

/// One line per card plus up to two highlight lines.
pub fn render_card(card: &ResultCard<'_>) -> String {
    let result = card.result;
    let title = result
        .title()
        .or_else(|| result.content())
        .map(|t| t.lines().next().unwrap_or_default().to_string())
        .unwrap_or_else(|| result.id.clone());
    let score = match (card.show_score, card.score) {
        (true, Some(score)) => format!("{score:.2}"),
        _ => "-".to_string(),
    };
    let kind = result.memory_type().unwrap_or("");

    let mut out = format!("{:>3}. {:<width$} {:>6}  {}", card.rank, truncate(&title, TITLE_WIDTH), score, kind, width = TITLE_WIDTH);
    for highlight in result.highlights.iter().take(2) {
        out.push_str(&format!("\n       \u{203a} {}", truncate(highlight, TITLE_WIDTH + 8)));
    }
    out.trim_end().to_string()
}

/// Full human-readable rendering: (stdout body, stderr status line).
pub fn render_view(view: &View<'_>) -> (String, String) {
    match view {
        View::Populated { cards, elapsed_ms } => {
            let body = cards.iter().map(render_card).collect::<Vec<_>>().join("\n");
            (body, format!("\n{} results in {:.1}ms", cards.len(), elapsed_ms))
        }
        View::Errored { detail, .. } => {
            let mut status = view.headline().to_string();
            if let Some(hint) = view.hint() {
                status.push_str(&format!("\n{hint}"));
            }
            status.push_str(&format!("\n({detail})"));
            (String::new(), status)
        }
        _ => {
            let mut status = view.headline().to_string();
            if let Some(hint) = view.hint() {
                status.push_str(&format!("\n{hint}"));
            }
            (String::new(), status)
        }
    }
}
