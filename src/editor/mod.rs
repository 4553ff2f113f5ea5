/*!
 * Page Editor
 * Edit session state for one page: metadata form, sections, validation and save
 */
pub mod capabilities;

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::content::editor::{self as section_editor, EditError, SectionEdit};
use crate::content::form::FormErrors;
use crate::content::preview::{self, PreviewDocument};
use crate::content::sections::SectionsError;
use crate::content::{
    Direction, FormValues, Page, PageContent, PageInput, Section, SectionKind, Sections,
    ValidationIssues, ValidationReport,
};
use crate::store::{PageStore, StoreError};
use crate::validator::{ContentValidator, ValidatorResult};

pub use capabilities::{Navigator, Notifier, Toast, ToastVariant, TracingNotifier};

/// Where the editor returns after saving or a failed load
pub const PAGE_LIST_PATH: &str = "/admin/pages";

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid page: {0}")]
    Form(FormErrors),

    #[error("page not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sections(#[from] SectionsError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Editor tabs; any tab can be opened at any time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorView {
    #[default]
    Content,
    Preview,
    Validation,
}

/// Collaborators injected into an editor
#[derive(Clone)]
pub struct EditorContext {
    pub store: Arc<dyn PageStore>,
    pub validator: Arc<dyn ContentValidator>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

/// Snapshot taken when a validation run starts
#[derive(Debug, Clone)]
pub struct ValidationTicket {
    pub seq: u64,
    pub content: PageContent,
    pub slug: String,
}

pub struct PageEditor {
    ctx: EditorContext,
    page_id: Option<Uuid>,
    form: FormValues,
    sections: Sections,
    view: EditorView,
    loading: bool,
    saving: bool,
    validating: bool,
    validation_issues: ValidationIssues,
    validation_seq: u64,
}

impl PageEditor {
    /// Editor for a page that does not exist yet
    pub fn new(ctx: EditorContext) -> Self {
        Self {
            ctx,
            page_id: None,
            form: FormValues::default(),
            sections: Sections::new(),
            view: EditorView::default(),
            loading: false,
            saving: false,
            validating: false,
            validation_issues: ValidationIssues::default(),
            validation_seq: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn page_id(&self) -> Option<Uuid> {
        self.page_id
    }

    pub fn is_new_page(&self) -> bool {
        self.page_id.is_none()
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn set_view(&mut self, view: EditorView) {
        self.view = view;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_validating(&self) -> bool {
        self.validating
    }

    pub fn validation_issues(&self) -> &ValidationIssues {
        &self.validation_issues
    }

    /// Count shown on the Validation tab
    pub fn validation_badge(&self) -> usize {
        self.validation_issues.errors.len() + self.validation_issues.warnings.len()
    }

    pub fn content(&self) -> PageContent {
        PageContent {
            sections: self.sections.clone(),
        }
    }

    pub fn preview(&self) -> PreviewDocument {
        preview::render(&self.form.title, &self.sections)
    }

    // ========================================================================
    // Form
    // ========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.form.slug = slug.into();
    }

    pub fn set_meta_description(&mut self, meta: impl Into<String>) {
        self.form.meta_description = meta.into();
    }

    pub fn set_published(&mut self, published: bool) {
        self.form.published = published;
    }

    // ========================================================================
    // Sections
    // ========================================================================

    pub fn add_section(&mut self, kind: SectionKind) {
        self.sections = self.sections.add(kind);
    }

    pub fn remove_section(&mut self, index: usize) -> EditorResult<()> {
        self.sections = self.sections.remove(index)?;
        Ok(())
    }

    pub fn move_section(&mut self, index: usize, direction: Direction) -> EditorResult<()> {
        self.sections = self.sections.move_section(index, direction)?;
        Ok(())
    }

    pub fn update_section(&mut self, index: usize, section: Section) -> EditorResult<()> {
        self.sections = self.sections.update(index, section)?;
        Ok(())
    }

    /// Applies one field edit to the section at `index`
    pub fn edit_section(&mut self, index: usize, edit: SectionEdit) -> EditorResult<()> {
        let current = self.sections.get(index).ok_or(SectionsError::OutOfRange {
            index,
            len: self.sections.len(),
        })?;
        let updated = section_editor::apply(current, edit)?;
        self.update_section(index, updated)
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Fetches an existing page into the editor. A missing page or failed
    /// fetch sends the user back to the page list.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self, id: Uuid) -> EditorResult<()> {
        self.loading = true;
        let result = self.ctx.store.get_page_by_id(id).await;
        self.loading = false;

        match result {
            Ok(Some(page)) => {
                self.apply_page(page);
                Ok(())
            }
            Ok(None) => {
                tracing::warn!(page_id = %id, "page not found");
                self.ctx.notifier.notify(Toast::new(
                    ToastVariant::Destructive,
                    "Page not found",
                    "The page you are trying to edit does not exist.",
                ));
                self.ctx.navigator.navigate(PAGE_LIST_PATH);
                Err(EditorError::NotFound(id))
            }
            Err(e) => {
                tracing::error!(page_id = %id, error = %e, "failed to load page");
                self.ctx.notifier.notify(Toast::new(
                    ToastVariant::Destructive,
                    "Error",
                    "Failed to load page",
                ));
                self.ctx.navigator.navigate(PAGE_LIST_PATH);
                Err(e.into())
            }
        }
    }

    fn apply_page(&mut self, page: Page) {
        self.page_id = Some(page.id);
        self.form = FormValues {
            title: page.title,
            slug: page.slug,
            meta_description: page.meta_description.unwrap_or_default(),
            published: page.published,
        };
        self.sections = page.content.sections;
        self.validation_issues = ValidationIssues::default();
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Starts a validation run. Any run started earlier becomes stale.
    pub fn begin_validation(&mut self) -> ValidationTicket {
        self.validation_seq += 1;
        self.validating = true;
        ValidationTicket {
            seq: self.validation_seq,
            content: self.content(),
            slug: self.form.slug.clone(),
        }
    }

    /// Records the outcome of the run `seq`. Returns the report only when the
    /// run is still the latest and succeeded; stale outcomes are dropped.
    pub fn complete_validation(
        &mut self,
        seq: u64,
        result: ValidatorResult<ValidationReport>,
    ) -> Option<ValidationReport> {
        if seq != self.validation_seq {
            tracing::debug!(seq, latest = self.validation_seq, "discarding stale validation result");
            return None;
        }
        self.validating = false;

        match result {
            Ok(report) => {
                self.validation_issues = report.issues.clone();
                Some(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "content validation failed");
                self.ctx.notifier.notify(Toast::new(
                    ToastVariant::Destructive,
                    "Validation Error",
                    e.to_string(),
                ));
                self.validation_issues = ValidationIssues::default();
                None
            }
        }
    }

    /// Validates the current content and stores the fresh issues
    pub async fn validate(&mut self) -> Option<ValidationReport> {
        let ticket = self.begin_validation();
        let validator = Arc::clone(&self.ctx.validator);
        let result = validator.validate(&ticket.content, &ticket.slug).await;
        self.complete_validation(ticket.seq, result)
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Validates, then creates or updates the page. Content issues are
    /// reported but never block the save.
    #[tracing::instrument(skip(self), fields(page_id = ?self.page_id, slug = %self.form.slug))]
    pub async fn submit(&mut self) -> EditorResult<Page> {
        self.form.validate().map_err(|errors| {
            tracing::debug!(errors = %errors, "form rejected");
            EditorError::Form(errors)
        })?;

        let content = self.content();

        if let Some(report) = self.validate().await {
            if report.issues.has_problems() {
                self.ctx.notifier.notify(Toast::new(
                    ToastVariant::Warning,
                    "Content Issues Detected",
                    format!(
                        "Found {} error(s) and {} warning(s). The page will be saved anyway.",
                        report.issues.errors.len(),
                        report.issues.warnings.len()
                    ),
                ));
            }
        }

        let input = PageInput::new(&self.form, content);
        self.saving = true;
        let result = match self.page_id {
            Some(id) => self.ctx.store.update_page(id, input).await,
            None => self.ctx.store.create_page(input).await,
        };
        self.saving = false;

        match result {
            Ok(page) => {
                tracing::info!(page_id = %page.id, published = page.published, "page saved");
                let toast = if page.published {
                    Toast::new(ToastVariant::Default, "Page published", "Your page is now live.")
                } else {
                    Toast::new(ToastVariant::Default, "Page saved", "Your changes have been saved.")
                };
                self.ctx.notifier.notify(toast);
                self.page_id = Some(page.id);
                self.ctx.navigator.navigate(PAGE_LIST_PATH);
                Ok(page)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save page");
                self.ctx.notifier.notify(Toast::new(
                    ToastVariant::Destructive,
                    "Error",
                    format!("Failed to save page: {}", e),
                ));
                Err(e.into())
            }
        }
    }
}
