//! Per-reading widget: owns handles to its elements and turns user actions
//! into display updates and [`Submission`]s.

use crate::client::{ReadingClient, SubmitOutcome};
use crate::dom::{Display, Document, ElementId};
use crate::errors::WidgetError;
use crate::models::{ReadingId, Submission, validate_deadline};
use crate::panels::{PanelState, StatsView};
use crate::progress::ProgressView;
use tracing::{debug, info, warn};

/// Base names of the widget's elements; the rendered id is `<base>-<reading>`.
pub mod ids {
    pub const SLIDER: &str = "slider";
    pub const PAGES_COUNT: &str = "pages-count";
    pub const PERCENT_PAGES: &str = "percent-pages";
    pub const SLIDER_BLOCK: &str = "slider-block";
    pub const UPDATE_BUTTON_BLOCK: &str = "update-button-block";
    pub const SAVE_BUTTON_BLOCK: &str = "save-button-block";
    pub const SAVE_BUTTON: &str = "save-button";
    pub const DEADLINE_BLOCK: &str = "deadline-block";
    pub const DEADLINE_DATE: &str = "deadline-date";
    pub const DEADLINE_PAGES: &str = "deadline-pages";
    pub const UPDATE_ERROR: &str = "update-error";
    pub const STATS_SUMMARY: &str = "stats-stats-block";
    pub const STATS_PROGRESS: &str = "stats-progress-block";
}

#[derive(Debug, Clone)]
struct DeadlineHandles {
    block: ElementId,
    date: ElementId,
    pages: ElementId,
}

#[derive(Debug, Clone)]
struct WidgetHandles {
    slider: ElementId,
    pages_count: ElementId,
    percent_pages: ElementId,
    slider_block: ElementId,
    update_button_block: ElementId,
    save_button_block: ElementId,
    save_button: ElementId,
    deadline: Option<DeadlineHandles>,
    failure: Option<ElementId>,
}

impl WidgetHandles {
    fn resolve(doc: &Document, reading: &ReadingId) -> Result<Self, WidgetError> {
        let required = |base: &str| {
            let id = ElementId::scoped(base, reading);
            doc.get(&id).map(|_| id)
        };
        let optional = |base: &str| Some(ElementId::scoped(base, reading)).filter(|id| doc.contains(id));

        let deadline = match optional(ids::DEADLINE_BLOCK) {
            Some(block) => Some(DeadlineHandles {
                block,
                date: required(ids::DEADLINE_DATE)?,
                pages: required(ids::DEADLINE_PAGES)?,
            }),
            None => None,
        };

        Ok(Self {
            slider: required(ids::SLIDER)?,
            pages_count: required(ids::PAGES_COUNT)?,
            percent_pages: required(ids::PERCENT_PAGES)?,
            slider_block: required(ids::SLIDER_BLOCK)?,
            update_button_block: required(ids::UPDATE_BUTTON_BLOCK)?,
            save_button_block: required(ids::SAVE_BUTTON_BLOCK)?,
            save_button: required(ids::SAVE_BUTTON)?,
            deadline,
            failure: optional(ids::UPDATE_ERROR),
        })
    }
}

/// What the host page should do once a submission has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSubmit {
    Reload,
    Stay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub outcome: SubmitOutcome,
    pub next: AfterSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Update,
    Dnf,
}

#[derive(Debug, Clone)]
pub struct ReadingWidget {
    reading: ReadingId,
    handles: WidgetHandles,
    state: PanelState,
    pending: Option<Pending>,
}

impl ReadingWidget {
    pub fn mount(doc: &Document, reading: ReadingId) -> Result<Self, WidgetError> {
        let handles = WidgetHandles::resolve(doc, &reading)?;
        debug!(
            %reading,
            deadline = handles.deadline.is_some(),
            "mounted reading widget"
        );
        Ok(Self {
            reading,
            handles,
            state: PanelState::Collapsed,
            pending: None,
        })
    }

    pub fn reading(&self) -> &ReadingId {
        &self.reading
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn has_deadline_controls(&self) -> bool {
        self.handles.deadline.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn total_pages(&self, doc: &Document) -> Result<u32, WidgetError> {
        self.page_attribute(doc, "total-pages")
    }

    pub fn current_pages(&self, doc: &Document) -> Result<u32, WidgetError> {
        self.page_attribute(doc, "current-pages")
    }

    fn page_attribute(&self, doc: &Document, name: &str) -> Result<u32, WidgetError> {
        let element = doc.get(&self.handles.pages_count)?;
        let raw = element
            .data(name)
            .ok_or_else(|| WidgetError::MissingAttribute {
                element: element.id.clone(),
                name: format!("data-{name}"),
            })?;
        raw.trim()
            .parse()
            .map_err(|_| WidgetError::invalid_number(&element.id, raw))
    }

    pub fn slider_value(&self, doc: &Document) -> Result<i64, WidgetError> {
        let slider = doc.get(&self.handles.slider)?;
        slider
            .value
            .trim()
            .parse()
            .map_err(|_| WidgetError::invalid_number(&slider.id, &slider.value))
    }

    /// Writes the pages/percent texts and the save button for `value`.
    pub fn render_progress(&self, doc: &mut Document, value: i64) -> Result<ProgressView, WidgetError> {
        let view = ProgressView::compute(value, self.total_pages(doc)?);
        doc.set_text(&self.handles.pages_count, view.pages_text.as_str())?;
        doc.set_text(&self.handles.percent_pages, view.percent_text.as_str())?;

        let button = doc.get_mut(&self.handles.save_button)?;
        button.text = view.save_label.to_string();
        button.swap_class(view.save_style.other().css_class(), view.save_style.css_class());
        Ok(view)
    }

    pub fn on_slider_input(&self, doc: &mut Document) -> Result<ProgressView, WidgetError> {
        let value = self.slider_value(doc)?;
        self.render_progress(doc, value)
    }

    /// Moves the slider by `delta` pages, held inside the slider's bounds.
    pub fn add_pages_to_slider(&self, doc: &mut Document, delta: i64) -> Result<ProgressView, WidgetError> {
        let mut value = self.slider_value(doc)?.saturating_add(delta);

        let slider = doc.get(&self.handles.slider)?;
        let bound = |name: &str| -> Result<Option<i64>, WidgetError> {
            slider
                .attr(name)
                .map(|raw| {
                    raw.trim()
                        .parse()
                        .map_err(|_| WidgetError::invalid_number(&slider.id, raw))
                })
                .transpose()
        };
        if let Some(max) = bound("max")? {
            value = value.min(max);
        }
        if let Some(min) = bound("min")? {
            value = value.max(min);
        }

        doc.set_value(&self.handles.slider, value.to_string())?;
        self.render_progress(doc, value)
    }

    /// Primary toggle. Opening resets the slider to the stored progress.
    pub fn toggle_slider(&mut self, doc: &mut Document) -> Result<PanelState, WidgetError> {
        let next = self.state.toggle_edit();
        if self.state == PanelState::Collapsed && next == PanelState::Editing {
            let current = i64::from(self.current_pages(doc)?);
            doc.set_value(&self.handles.slider, current.to_string())?;
            self.render_progress(doc, current)?;
        }
        self.transition(doc, next)
    }

    pub fn toggle_deadline(&mut self, doc: &mut Document) -> Result<PanelState, WidgetError> {
        if self.handles.deadline.is_none() {
            return Err(WidgetError::missing_element(
                ElementId::scoped(ids::DEADLINE_BLOCK, &self.reading).as_str(),
            ));
        }
        let next = self.state.toggle_deadline();
        self.transition(doc, next)
    }

    fn transition(&mut self, doc: &mut Document, next: PanelState) -> Result<PanelState, WidgetError> {
        self.apply_panels(doc, next)?;
        debug!(reading = %self.reading, from = ?self.state, to = ?next, "panel transition");
        self.state = next;
        Ok(next)
    }

    fn apply_panels(&self, doc: &mut Document, state: PanelState) -> Result<(), WidgetError> {
        let visibility = state.visibility();
        let handles = &self.handles;
        doc.set_display(&handles.slider_block, Display::from_visible(visibility.slider))?;
        doc.set_display(
            &handles.update_button_block,
            Display::from_visible(visibility.update_button),
        )?;
        doc.set_display(
            &handles.save_button_block,
            Display::from_visible(visibility.save_button),
        )?;
        if let Some(deadline) = &handles.deadline {
            doc.set_display(&deadline.block, Display::from_visible(visibility.deadline))?;
        }
        Ok(())
    }

    /// Picks the one request a click on "Save" issues. `total_pages`
    /// overrides the page's data attribute when given.
    pub fn prepare_update(
        &self,
        doc: &Document,
        total_pages: Option<u32>,
    ) -> Result<Submission, WidgetError> {
        let total = match total_pages {
            Some(total) => total,
            None => self.total_pages(doc)?,
        };
        let reading = self.reading.clone();

        if let Some(deadline) = &self.handles.deadline {
            let date = doc.get(&deadline.date)?.value.trim();
            if !date.is_empty() {
                let deadline_date = validate_deadline(date)?;
                let pages = doc.get(&deadline.pages)?;
                let percent = match pages.value.trim() {
                    "" => 100.0,
                    raw => {
                        let target: u32 = raw
                            .parse()
                            .map_err(|_| WidgetError::invalid_number(&pages.id, raw))?;
                        if total == 0 {
                            return Err(WidgetError::ZeroTotalPages);
                        }
                        100.0 * f64::from(target) / f64::from(total)
                    }
                };
                return Ok(Submission::SetDeadline {
                    reading,
                    deadline: deadline_date,
                    percent,
                });
            }
        }

        let value = self.slider_value(doc)?;
        if value == i64::from(total) {
            Ok(Submission::MarkFinished { reading })
        } else {
            Ok(Submission::MarkPages {
                reading,
                new_pages: value,
            })
        }
    }

    /// Starts a save: locks the widget until [`Self::complete`] runs.
    pub fn begin_save(
        &mut self,
        doc: &mut Document,
        total_pages: Option<u32>,
    ) -> Result<Submission, WidgetError> {
        self.ensure_idle()?;
        let submission = self.prepare_update(doc, total_pages)?;
        self.lock(doc, Pending::Update)?;
        Ok(submission)
    }

    pub fn begin_dnf(&mut self, doc: &mut Document) -> Result<Submission, WidgetError> {
        self.ensure_idle()?;
        self.lock(doc, Pending::Dnf)?;
        Ok(Submission::MarkDnf {
            reading: self.reading.clone(),
        })
    }

    fn ensure_idle(&self) -> Result<(), WidgetError> {
        if self.pending.is_some() {
            warn!(reading = %self.reading, "ignoring submission while another is in flight");
            return Err(WidgetError::SubmissionInFlight);
        }
        Ok(())
    }

    fn lock(&mut self, doc: &mut Document, pending: Pending) -> Result<(), WidgetError> {
        self.clear_failure(doc)?;
        doc.get_mut(&self.handles.save_button)?.disabled = true;
        self.pending = Some(pending);
        Ok(())
    }

    /// Unlocks the widget. Abandoning always reloads; an update reloads only
    /// when the backend accepted it.
    pub fn complete(
        &mut self,
        doc: &mut Document,
        outcome: &SubmitOutcome,
    ) -> Result<AfterSubmit, WidgetError> {
        doc.get_mut(&self.handles.save_button)?.disabled = false;
        let next = match self.pending.take() {
            Some(Pending::Dnf) => AfterSubmit::Reload,
            Some(Pending::Update) if outcome.is_success() => AfterSubmit::Reload,
            Some(Pending::Update) => AfterSubmit::Stay,
            None => {
                warn!(reading = %self.reading, "completion without a pending submission");
                AfterSubmit::Stay
            }
        };
        info!(reading = %self.reading, ?outcome, ?next, "submission finished");
        Ok(next)
    }

    /// Shows `outcome` in the failure indicator, when the page has one.
    pub fn show_failure(&self, doc: &mut Document, outcome: &SubmitOutcome) -> Result<(), WidgetError> {
        let Some(failure) = &self.handles.failure else {
            warn!(reading = %self.reading, "no failure indicator to show '{}'", outcome.describe());
            return Ok(());
        };
        let element = doc.get_mut(failure)?;
        element.text = outcome.describe();
        element.display = Display::Shown;
        Ok(())
    }

    pub fn clear_failure(&self, doc: &mut Document) -> Result<(), WidgetError> {
        if let Some(failure) = &self.handles.failure {
            let element = doc.get_mut(failure)?;
            element.text.clear();
            element.display = Display::Hidden;
        }
        Ok(())
    }

    pub async fn save_reading_update(
        &mut self,
        doc: &mut Document,
        client: &ReadingClient,
        total_pages: Option<u32>,
    ) -> Result<Completion, WidgetError> {
        let submission = self.begin_save(doc, total_pages)?;
        self.finish(doc, client, &submission).await
    }

    pub async fn dnf_reading(
        &mut self,
        doc: &mut Document,
        client: &ReadingClient,
    ) -> Result<Completion, WidgetError> {
        let submission = self.begin_dnf(doc)?;
        self.finish(doc, client, &submission).await
    }

    async fn finish(
        &mut self,
        doc: &mut Document,
        client: &ReadingClient,
        submission: &Submission,
    ) -> Result<Completion, WidgetError> {
        let outcome = client.send(submission).await;
        let next = self.complete(doc, &outcome)?;
        Ok(Completion { outcome, next })
    }
}

/// Page-level switch between the stats summary and the progress chart.
#[derive(Debug, Clone)]
pub struct StatsToggle {
    summary: ElementId,
    progress: ElementId,
    view: StatsView,
}

impl StatsToggle {
    pub fn mount(doc: &Document) -> Result<Self, WidgetError> {
        let summary = ElementId::new(ids::STATS_SUMMARY);
        let progress = ElementId::new(ids::STATS_PROGRESS);
        let view = if doc.get(&summary)?.display.is_visible() {
            StatsView::Summary
        } else {
            StatsView::Progress
        };
        doc.get(&progress)?;
        Ok(Self {
            summary,
            progress,
            view,
        })
    }

    pub fn view(&self) -> StatsView {
        self.view
    }

    pub fn toggle(&mut self, doc: &mut Document) -> Result<StatsView, WidgetError> {
        let next = self.view.toggle();
        doc.set_display(&self.summary, Display::from_visible(next == StatsView::Summary))?;
        doc.set_display(&self.progress, Display::from_visible(next == StatsView::Progress))?;
        self.view = next;
        Ok(next)
    }
}
