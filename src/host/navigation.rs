use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationMeta {
    #[serde(rename = "type")]
    pub type_code: Option<i64>,
    pub redirect_count: u32,
}

impl NavigationMeta {
    pub fn navigation_type(&self) -> NavigationType {
        NavigationType::from_code(self.type_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
    UserInteraction,
    Reload,
    HistoryNavigation,
    Unknown,
}

impl NavigationType {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => NavigationType::UserInteraction,
            Some(1) => NavigationType::Reload,
            Some(2) => NavigationType::HistoryNavigation,
            _ => NavigationType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(NavigationType::from_code(Some(0)), NavigationType::UserInteraction);
        assert_eq!(NavigationType::from_code(Some(1)), NavigationType::Reload);
        assert_eq!(NavigationType::from_code(Some(2)), NavigationType::HistoryNavigation);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(NavigationType::from_code(Some(99)), NavigationType::Unknown);
        assert_eq!(NavigationType::from_code(Some(-1)), NavigationType::Unknown);
        assert_eq!(NavigationType::from_code(None), NavigationType::Unknown);
    }

    #[test]
    fn test_deserialize_navigation() {
        let meta: NavigationMeta =
            serde_yaml::from_str("type: 1\nredirectCount: 3").expect("Invalid YAML");
        assert_eq!(meta.navigation_type(), NavigationType::Reload);
        assert_eq!(meta.redirect_count, 3);

        let empty: NavigationMeta = serde_yaml::from_str("{}").expect("Invalid YAML");
        assert_eq!(empty.navigation_type(), NavigationType::Unknown);
        assert_eq!(empty.redirect_count, 0);
    }
}
