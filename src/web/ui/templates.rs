use askama::Template;
use askama_web::WebTemplate;

/// Loading indicator, the two stacked surfaces and the hint area.
#[derive(Template, WebTemplate)]
#[template(path = "widget.html")]
pub struct WidgetTemplate {
    pub width: u32,
    pub height: u32,
    pub loading: bool,
    pub hint: String,
}
