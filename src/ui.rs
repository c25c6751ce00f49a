use crate::dom::{Document, Element, ElementId};
use crate::models::ReadingSnapshot;
use crate::progress::ProgressView;
use crate::widget::ids;

/// Markup for one reading's widget, in its initial collapsed state.
pub fn render_widget(snapshot: &ReadingSnapshot) -> String {
    let view = ProgressView::compute(i64::from(snapshot.current_pages), snapshot.total_pages);
    let (deadline, deadline_toggle) = if snapshot.deadline_controls {
        (DEADLINE_HTML, DEADLINE_TOGGLE_HTML)
    } else {
        ("", "")
    };

    WIDGET_HTML
        .replace("{{DEADLINE}}", deadline)
        .replace("{{DEADLINE_TOGGLE}}", deadline_toggle)
        .replace("{{ID}}", snapshot.reading.as_str())
        .replace("{{CURRENT}}", &snapshot.current_pages.to_string())
        .replace("{{TOTAL}}", &snapshot.total_pages.to_string())
        .replace("{{PAGES_TEXT}}", &view.pages_text)
        .replace("{{PERCENT_TEXT}}", &view.percent_text)
        .replace("{{SAVE_LABEL}}", view.save_label)
        .replace("{{SAVE_CLASS}}", view.save_style.css_class())
        .replace("{{TITLE}}", &escape_html(&snapshot.title))
}

pub fn render_stats_toggle() -> &'static str {
    STATS_HTML
}

/// Builds the elements [`render_widget`] emits as a headless document.
pub fn seed_document(snapshot: &ReadingSnapshot) -> Document {
    let mut doc = Document::new();
    seed_widget(&mut doc, snapshot);
    doc
}

pub fn seed_widget(doc: &mut Document, snapshot: &ReadingSnapshot) {
    let id = |base: &str| ElementId::scoped(base, &snapshot.reading);
    let view = ProgressView::compute(i64::from(snapshot.current_pages), snapshot.total_pages);

    doc.insert(Element::new(&id(ids::UPDATE_BUTTON_BLOCK)));
    doc.insert(Element::new(&id(ids::SLIDER_BLOCK)).hidden());
    doc.insert(
        Element::new(&id(ids::SLIDER))
            .with_attr("type", "range")
            .with_attr("min", 0)
            .with_attr("max", snapshot.total_pages)
            .with_value(snapshot.current_pages.to_string()),
    );
    doc.insert(
        Element::new(&id(ids::PAGES_COUNT))
            .with_attr("data-current-pages", snapshot.current_pages)
            .with_attr("data-total-pages", snapshot.total_pages)
            .with_text(view.pages_text.as_str()),
    );
    doc.insert(Element::new(&id(ids::PERCENT_PAGES)).with_text(view.percent_text.as_str()));
    doc.insert(Element::new(&id(ids::SAVE_BUTTON_BLOCK)).hidden());
    doc.insert(
        Element::new(&id(ids::SAVE_BUTTON))
            .with_class("btn")
            .with_class(view.save_style.css_class())
            .with_text(view.save_label),
    );
    doc.insert(Element::new(&id(ids::UPDATE_ERROR)).hidden());

    if snapshot.deadline_controls {
        doc.insert(Element::new(&id(ids::DEADLINE_BLOCK)).hidden());
        doc.insert(Element::new(&id(ids::DEADLINE_DATE)).with_attr("type", "date"));
        doc.insert(
            Element::new(&id(ids::DEADLINE_PAGES))
                .with_attr("type", "number")
                .with_attr("min", 0)
                .with_attr("max", snapshot.total_pages),
        );
    }
}

pub fn seed_stats(doc: &mut Document) {
    doc.insert(Element::new(&ElementId::new(ids::STATS_SUMMARY)));
    doc.insert(Element::new(&ElementId::new(ids::STATS_PROGRESS)).hidden());
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const WIDGET_HTML: &str = r#"<div class="reading-card" id="reading-{{ID}}">
  <h3 class="reading-title">{{TITLE}}</h3>
  <p>
    <span id="pages-count-{{ID}}" data-current-pages="{{CURRENT}}" data-total-pages="{{TOTAL}}">{{PAGES_TEXT}}</span>
    <span id="percent-pages-{{ID}}">{{PERCENT_TEXT}}</span>
  </p>
  <div id="update-button-block-{{ID}}">
    <button type="button" class="btn btn-primary" data-action="toggle-slider" data-reading="{{ID}}">Update</button>
  </div>
  <div id="slider-block-{{ID}}" style="display: none">
    <button type="button" class="btn btn-light" data-action="add-pages" data-delta="-1" data-reading="{{ID}}">-1</button>
    <input id="slider-{{ID}}" type="range" min="0" max="{{TOTAL}}" value="{{CURRENT}}" data-action="slider-input" data-reading="{{ID}}" />
    <button type="button" class="btn btn-light" data-action="add-pages" data-delta="1" data-reading="{{ID}}">+1</button>
{{DEADLINE_TOGGLE}}  </div>
{{DEADLINE}}  <div id="save-button-block-{{ID}}" style="display: none">
    <button id="save-button-{{ID}}" type="button" class="btn {{SAVE_CLASS}}" data-action="save" data-reading="{{ID}}">{{SAVE_LABEL}}</button>
    <button type="button" class="btn btn-outline-secondary" data-action="dnf" data-reading="{{ID}}">Abandon</button>
  </div>
  <p id="update-error-{{ID}}" class="status" data-type="error" style="display: none"></p>
</div>
"#;

const DEADLINE_HTML: &str = r#"  <div id="deadline-block-{{ID}}" style="display: none">
    <input id="deadline-date-{{ID}}" type="date" />
    <input id="deadline-pages-{{ID}}" type="number" min="0" placeholder="all pages" />
    <button type="button" class="btn btn-link" data-action="toggle-deadline" data-reading="{{ID}}">Progress</button>
  </div>
"#;

const DEADLINE_TOGGLE_HTML: &str = r#"    <button type="button" class="btn btn-link" data-action="toggle-deadline" data-reading="{{ID}}">Deadline</button>
"#;

const STATS_HTML: &str = r#"<div class="tabs">
  <button class="tab" type="button" data-action="toggle-stats">Stats / Progress</button>
</div>
<div id="stats-stats-block"></div>
<div id="stats-progress-block" style="display: none"></div>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingId;
    use crate::progress::ButtonStyle;
    use crate::widget::ReadingWidget;

    fn snapshot() -> ReadingSnapshot {
        let mut snapshot = ReadingSnapshot::new(ReadingId::from(9), 30, 120);
        snapshot.title = "Dune & <Sons>".to_string();
        snapshot
    }

    #[test]
    fn markup_carries_dom_contract() {
        let html = render_widget(&snapshot());
        assert!(html.contains(r#"id="pages-count-9" data-current-pages="30" data-total-pages="120""#));
        assert!(html.contains(r#"id="slider-9" type="range" min="0" max="120" value="30""#));
        assert!(html.contains("30 / 120 pages"));
        assert!(html.contains("25.0 %"));
        assert!(html.contains(r#"id="deadline-block-9""#));
        assert!(html.contains("Dune &amp; &lt;Sons&gt;"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn markup_without_deadline_controls() {
        let mut snapshot = snapshot();
        snapshot.deadline_controls = false;
        let html = render_widget(&snapshot);
        assert!(!html.contains("deadline-block"));
        assert!(!html.contains("toggle-deadline"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn finished_reading_renders_finish_button() {
        let snapshot = ReadingSnapshot::new(ReadingId::from(4), 80, 80);
        let html = render_widget(&snapshot);
        let class = ButtonStyle::Danger.css_class();
        assert!(html.contains(&format!(r#"class="btn {class}""#)));
        assert!(html.contains(">Finish</button>"));
    }

    #[test]
    fn seeded_document_mounts() {
        let snapshot = snapshot();
        let doc = seed_document(&snapshot);
        let widget = ReadingWidget::mount(&doc, snapshot.reading.clone()).unwrap();
        assert!(widget.has_deadline_controls());
        assert_eq!(widget.current_pages(&doc).unwrap(), 30);
        assert_eq!(widget.total_pages(&doc).unwrap(), 120);
        assert_eq!(widget.slider_value(&doc).unwrap(), 30);
    }

    #[test]
    fn stats_markup_starts_on_summary() {
        assert!(render_stats_toggle().contains(r#"<div id="stats-progress-block" style="display: none">"#));
    }
}
