use serde::{Deserialize, Serialize};

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

// Shared paging fields for the search endpoints.
#[derive(Deserialize, Default, Clone, Copy)]
pub struct PageParams {
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn clamp(&self) -> (i64, i64) {
        let first_index = self.first_index.unwrap_or(0).max(0);
        let limit = self.limit.unwrap_or(30).max(0).min(100);
        (first_index, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults() {
        let page = PageParams::default();
        assert_eq!(page.clamp(), (0, 30));
    }

    #[test]
    fn page_clamps_bad_input() {
        let page = PageParams {
            first_index: Some(-5),
            limit: Some(100_000),
        };
        assert_eq!(page.clamp(), (0, 100));
    }
}
