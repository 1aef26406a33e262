/// Floating panel shared by every chart on a page.
pub trait Tooltip {
    /// Show `content` (HTML) at page coordinates `(x, y)`.
    fn show(&mut self, content: &str, x: f64, y: f64);
    fn hide(&mut self);
}

/// In-memory tooltip state. The panel is created on first use and reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipPanel {
    created: bool,
    visible: bool,
    content: String,
    x: f64,
    y: f64,
}

impl TooltipPanel {
    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Tooltip for TooltipPanel {
    fn show(&mut self, content: &str, x: f64, y: f64) {
        self.created = true;
        self.visible = true;
        self.content.clear();
        self.content.push_str(content);
        self.x = x;
        self.y = y;
    }

    fn hide(&mut self) {
        self.created = true;
        self.visible = false;
    }
}
