#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Focus {
    #[default]
    Brand,
    Comment,
    Selector,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) server: String,
    pub(crate) brand_input: String,
    pub(crate) comment_input: String,
    pub(crate) focus: Focus,
    pub(crate) alert: Option<String>,
    pub(crate) has_selector: bool,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(server: impl Into<String>, has_selector: bool) -> Self {
        Self {
            server: server.into(),
            has_selector,
            ..Self::default()
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Brand => Focus::Comment,
            Focus::Comment if self.has_selector => Focus::Selector,
            Focus::Comment | Focus::Selector => Focus::Brand,
        };
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Brand if self.has_selector => Focus::Selector,
            Focus::Brand => Focus::Comment,
            Focus::Comment => Focus::Brand,
            Focus::Selector => Focus::Comment,
        };
    }

    pub(crate) fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Brand => Some(&mut self.brand_input),
            Focus::Comment => Some(&mut self.comment_input),
            Focus::Selector => None,
        }
    }

    pub(crate) fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
        self.confirm_quit = false;
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
