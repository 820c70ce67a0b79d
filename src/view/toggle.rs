use url::Url;

use super::mode::ViewMode;

pub const VIEW_PARAM: &str = "view";

/// The shareable location of a case page.
///
/// The active [`ViewMode`] lives in the URL rather than beside it, so the
/// URL alone reproduces the view after a reload or when shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewToggle {
    location: Url,
}

impl ViewToggle {
    pub fn new(location: Url) -> Self {
        Self { location }
    }

    pub fn parse(location: &str) -> Result<Self, url::ParseError> {
        Url::parse(location).map(Self::new)
    }

    pub fn get_view(&self) -> ViewMode {
        let value = self
            .location
            .query_pairs()
            .find(|(key, _)| key == VIEW_PARAM)
            .map(|(_, value)| value.into_owned());
        ViewMode::from_param(value.as_deref())
    }

    /// Write `mode` into the URL, keeping every other query pair.
    ///
    /// Returns whether the effective view changed.
    pub fn set_view(&mut self, mode: ViewMode) -> bool {
        let changed = self.get_view() != mode;

        let others: Vec<(String, String)> = self
            .location
            .query_pairs()
            .filter(|(key, _)| key != VIEW_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = self.location.query_pairs_mut();
            pairs.clear();
            for (key, value) in &others {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(VIEW_PARAM, mode.as_str());
        }

        changed
    }

    pub fn location(&self) -> &Url {
        &self.location
    }
}
