//! Viewer state: document source, pagination and zoom

use std::fmt;

use docsign_common::Error;
use url::Url;

/// Only accepted MIME type for local files
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Shown when a selected file is not a PDF
pub const INVALID_FILE_MESSAGE: &str = "Please select a valid PDF file.";

/// Smallest zoom, in tenths
pub const MIN_ZOOM_TENTHS: u32 = 5;
/// Largest zoom, in tenths
pub const MAX_ZOOM_TENTHS: u32 = 30;
/// Initial zoom, in tenths
pub const DEFAULT_ZOOM_TENTHS: u32 = 10;

/// Where the displayed document comes from
#[derive(Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Served by the signing service
    Remote(Url),
    /// Picked by the user
    Local {
        /// Original file name
        file_name: String,
        /// File content
        bytes: Vec<u8>,
    },
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.debug_tuple("Remote").field(&url.as_str()).finish(),
            Self::Local { file_name, bytes } => f
                .debug_struct("Local")
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

impl DocumentSource {
    /// Local source, rejecting anything not typed `application/pdf`
    pub fn local<S>(file_name: S, mime: &str, bytes: Vec<u8>) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        if mime.trim() != PDF_MIME_TYPE {
            return Err(Error::validation(INVALID_FILE_MESSAGE));
        }

        Ok(Self::Local {
            file_name: file_name.into(),
            bytes,
        })
    }

    /// Name to show in the toolbar
    pub fn display_name(&self) -> String {
        match self {
            Self::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .unwrap_or(url.as_str())
                .to_string(),
            Self::Local { file_name, .. } => file_name.clone(),
        }
    }
}

/// Viewer state
#[derive(Debug, Clone)]
pub struct ViewerState {
    source: DocumentSource,
    current_page: u32,
    page_count: Option<u32>,
    zoom_tenths: u32,
}

impl ViewerState {
    /// Create new [`ViewerState`] on page 1 at 100%
    pub fn new(source: DocumentSource) -> Self {
        Self {
            source,
            current_page: 1,
            page_count: None,
            zoom_tenths: DEFAULT_ZOOM_TENTHS,
        }
    }

    /// Current source
    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Switch document, going back to page 1 with an unknown page count
    pub fn set_source(&mut self, source: DocumentSource) {
        self.source = source;
        self.current_page = 1;
        self.page_count = None;
    }

    /// Current page, starting at 1
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page count once the document has been loaded
    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    /// Record the page count; zero is treated as unknown
    pub fn set_page_count(&mut self, page_count: u32) {
        self.page_count = (page_count > 0).then_some(page_count);

        if let Some(count) = self.page_count {
            self.current_page = self.current_page.clamp(1, count);
        } else {
            self.current_page = 1;
        }
    }

    /// Whether [`ViewerState::next_page`] would move
    pub fn can_go_next(&self) -> bool {
        self.page_count
            .is_some_and(|count| self.current_page < count)
    }

    /// Whether [`ViewerState::previous_page`] would move
    pub fn can_go_previous(&self) -> bool {
        self.page_count.is_some() && self.current_page > 1
    }

    /// Move forward one page, returns whether the page changed
    pub fn next_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Move back one page, returns whether the page changed
    pub fn previous_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jump to `page`, clamped to the document
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let Some(count) = self.page_count else {
            return false;
        };

        let page = page.clamp(1, count);
        let changed = page != self.current_page;
        self.current_page = page;
        changed
    }

    /// Zoom factor, 1.0 is 100%
    pub fn zoom(&self) -> f32 {
        self.zoom_tenths as f32 / 10.0
    }

    /// Zoom as a whole percentage
    pub fn zoom_percent(&self) -> u32 {
        self.zoom_tenths * 10
    }

    /// One step in
    pub fn zoom_in(&mut self) {
        self.zoom_tenths = (self.zoom_tenths + 1).min(MAX_ZOOM_TENTHS);
    }

    /// One step out
    pub fn zoom_out(&mut self) {
        self.zoom_tenths = self.zoom_tenths.saturating_sub(1).max(MIN_ZOOM_TENTHS);
    }

    /// Set zoom factor, rounded to a tenth and clamped
    pub fn set_zoom(&mut self, zoom: f32) {
        let tenths = if zoom.is_finite() {
            (zoom * 10.0).round().clamp(MIN_ZOOM_TENTHS as f32, MAX_ZOOM_TENTHS as f32) as u32
        } else {
            DEFAULT_ZOOM_TENTHS
        };

        self.zoom_tenths = tenths;
    }

    /// Back to 100%
    pub fn reset_zoom(&mut self) {
        self.zoom_tenths = DEFAULT_ZOOM_TENTHS;
    }
}

/// Page count of a PDF
///
/// Walks the page tree from the catalog, so outline `/Count` entries and
/// objects kept in compressed object streams are handled.
pub fn count_pages(bytes: &[u8]) -> Result<u32, Error> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| Error::Document(format!("failed to parse PDF: {e}")))?;

    let pages = document.get_pages().len();

    u32::try_from(pages).map_err(|_| Error::Document(format!("too many pages: {pages}")))
}
