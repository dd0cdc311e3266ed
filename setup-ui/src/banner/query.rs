// Error code from the page URL

use crate::error::{Result, SetupUiError};
use url::Url;

/// Query parameter the setup handler puts failure codes in.
pub const ERROR_PARAM: &str = "err";

/// First `err` value in the query string of `href`, percent-decoded.
///
/// `None` when the parameter is absent. An empty value (`?err=`) is returned as `Some("")`
/// and simply matches no table entry.
pub fn read_error_code(href: &str) -> Result<Option<String>> {
    let url = Url::parse(href).map_err(|e| SetupUiError::InvalidUrl(format!("{}: {}", href, e)))?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == ERROR_PARAM)
        .map(|(_, value)| value.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_parameter_is_none() {
        assert_eq!(read_error_code("http://127.0.0.1:8080/general").unwrap(), None);
        assert_eq!(
            read_error_code("http://127.0.0.1:8080/general?foo=1").unwrap(),
            None
        );
    }

    #[test]
    fn first_value_wins() {
        assert_eq!(
            read_error_code("http://localhost/storage?err=420&err=1")
                .unwrap()
                .as_deref(),
            Some("420")
        );
    }

    #[test]
    fn value_is_percent_decoded() {
        assert_eq!(
            read_error_code("http://localhost/login?a=b&err=%31").unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(
            read_error_code("http://localhost/login?err=").unwrap().as_deref(),
            Some("")
        );
    }

    #[test]
    fn fragment_is_not_part_of_query() {
        assert_eq!(
            read_error_code("http://localhost/login#err=1").unwrap(),
            None
        );
    }

    #[test]
    fn relative_href_is_rejected() {
        assert!(matches!(
            read_error_code("/login?err=1"),
            Err(SetupUiError::InvalidUrl(_))
        ));
    }
}
