use cms_backend::content::editor::{SectionEdit, SectionField};
use cms_backend::content::{SectionKind, ValidationIssues};
use cms_backend::editor::{
    EditorContext, Navigator, Notifier, PageEditor, Toast, ToastVariant, PAGE_LIST_PATH,
};
use cms_backend::store::{MemoryPageStore, PageStore};
use cms_backend::validator::{StaticSession, ValidationClient, ValidatorConfig};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Toasts(Mutex<Vec<Toast>>);

impl Notifier for Toasts {
    fn notify(&self, toast: Toast) {
        self.0.lock().unwrap().push(toast);
    }
}

#[derive(Default)]
struct Routes(Mutex<Vec<String>>);

impl Navigator for Routes {
    fn navigate(&self, path: &str) {
        self.0.lock().unwrap().push(path.to_string());
    }
}

struct Session {
    editor: PageEditor,
    store: Arc<MemoryPageStore>,
    toasts: Arc<Toasts>,
    routes: Arc<Routes>,
}

async fn session(validator: &MockServer) -> Session {
    let store = Arc::new(MemoryPageStore::new());
    let toasts = Arc::new(Toasts::default());
    let routes = Arc::new(Routes::default());
    let client = ValidationClient::new(
        ValidatorConfig {
            endpoint: format!("{}/api/content/validate", validator.uri()),
        },
        Arc::new(StaticSession(Some("tok".into()))),
    );
    let editor = PageEditor::new(EditorContext {
        store: store.clone(),
        validator: Arc::new(client),
        notifier: toasts.clone(),
        navigator: routes.clone(),
    });
    Session {
        editor,
        store,
        toasts,
        routes,
    }
}

fn fill(editor: &mut PageEditor) {
    editor.set_title("About");
    editor.set_slug("about-us");
    editor.add_section(SectionKind::Hero);
    editor
        .edit_section(0, SectionEdit::Set(SectionField::Title, "Welcome".into()))
        .unwrap();
}

#[tokio::test]
async fn content_issues_warn_and_still_save() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/content/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": ["Missing H1"],
            "warnings": [],
            "seoSuggestions": []
        })))
        .mount(&server)
        .await;

    let mut s = session(&server).await;
    fill(&mut s.editor);

    let page = s.editor.submit().await.unwrap();

    assert_eq!(s.editor.validation_badge(), 1);
    let toasts = s.toasts.0.lock().unwrap().clone();
    assert_eq!(toasts[0].title, "Content Issues Detected");
    assert_eq!(toasts[0].variant, ToastVariant::Warning);
    assert!(s.store.get_page_by_id(page.id).await.unwrap().is_some());
    assert_eq!(*s.routes.0.lock().unwrap(), vec![PAGE_LIST_PATH.to_string()]);
}

#[tokio::test]
async fn validator_outage_resets_issues_and_toasts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut s = session(&server).await;
    fill(&mut s.editor);

    assert!(s.editor.validate().await.is_none());

    assert!(!s.editor.is_validating());
    assert_eq!(s.editor.validation_issues(), &ValidationIssues::default());
    let toasts = s.toasts.0.lock().unwrap().clone();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Validation Error");
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
}
