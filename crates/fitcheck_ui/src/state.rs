//! Region state types shared by the controller and the views

/// Contents of the image preview region.
///
/// The variants are mutually exclusive: a region never shows a spinner and
/// an image at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preview {
    /// Nothing selected yet (whatever the page declares)
    #[default]
    Empty,
    /// File is being read
    Loading,
    /// File was read and is shown as an image
    Image {
        /// `data:` URL of the file contents
        data_url: String,
        /// Alternative text
        alt: String,
    },
    /// File could not be read
    Error(String),
}

impl Preview {
    /// Whether the spinner is showing.
    pub fn is_loading(&self) -> bool {
        matches!(self, Preview::Loading)
    }

    /// Whether an image is showing.
    pub fn is_image(&self) -> bool {
        matches!(self, Preview::Image { .. })
    }
}

/// State of a push button that can be put into a busy state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    /// Whether the button accepts clicks
    pub enabled: bool,
    /// Text currently shown on the button
    pub label: String,
    /// Whether a small spinner is shown before the label
    pub busy: bool,
    idle_label: String,
}

impl ButtonState {
    /// Create an enabled button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            enabled: true,
            label: label.clone(),
            busy: false,
            idle_label: label,
        }
    }

    /// Disable the button and show a busy label.
    pub fn set_busy(&mut self, busy_label: impl Into<String>) {
        self.enabled = false;
        self.busy = true;
        self.label = busy_label.into();
    }

    /// Re-enable the button and restore its original label.
    pub fn restore(&mut self) {
        self.enabled = true;
        self.busy = false;
        self.label = self.idle_label.clone();
    }
}

/// Visibility of a collapsible panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Shown,
    Hidden,
}

impl PanelVisibility {
    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            PanelVisibility::Shown => PanelVisibility::Hidden,
            PanelVisibility::Hidden => PanelVisibility::Shown,
        }
    }

    /// CSS `display` value for this state.
    pub fn css_display(self) -> &'static str {
        match self {
            PanelVisibility::Shown => "block",
            PanelVisibility::Hidden => "none",
        }
    }

    /// Parse a CSS `display` value; anything except `none` counts as shown.
    pub fn from_css_display(display: &str) -> Self {
        if display.trim() == "none" {
            PanelVisibility::Hidden
        } else {
            PanelVisibility::Shown
        }
    }
}

impl From<bool> for PanelVisibility {
    fn from(visible: bool) -> Self {
        if visible {
            PanelVisibility::Shown
        } else {
            PanelVisibility::Hidden
        }
    }
}
