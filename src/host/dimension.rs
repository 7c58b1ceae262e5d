use tracing::trace;

use crate::core::{Dimension, Length};

use super::SurfaceElement;

const PX_SUFFIX: &str = "px";

/// Parsed computed-style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Pixels(f64),
    /// Anything that is not a pixel magnitude (`auto`, `50%`, ...).
    Raw(String),
}

impl StyleValue {
    #[must_use]
    pub fn as_pixels(&self) -> Option<f64> {
        match self {
            Self::Pixels(value) => Some(*value),
            Self::Raw(_) => None,
        }
    }
}

/// Strips a trailing `px` unit and parses the magnitude.
///
/// Values without the unit are returned raw unless they are a bare number.
#[must_use]
pub fn parse_style_value(raw: &str) -> StyleValue {
    let trimmed = raw.trim();
    let magnitude = trimmed.strip_suffix(PX_SUFFIX).unwrap_or(trimmed);
    match magnitude.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => StyleValue::Pixels(value),
        _ => StyleValue::Raw(raw.to_owned()),
    }
}

/// Live pixel size of `dimension`, or `None` when the host reports nothing
/// usable.
#[must_use]
pub fn measure<E: SurfaceElement + ?Sized>(element: &E, dimension: Dimension) -> Option<f64> {
    element
        .computed_style(dimension)
        .and_then(|raw| parse_style_value(&raw).as_pixels())
}

/// Resolves `dimension` from computed style, writing `fallback` back onto the
/// element when the value is absent, empty, zero or not a pixel magnitude.
pub fn resolve_dimension<E: SurfaceElement + ?Sized>(
    element: &mut E,
    dimension: Dimension,
    fallback: f64,
) -> f64 {
    match measure(element, dimension) {
        Some(value) if value != 0.0 => value,
        _ => {
            trace!(%dimension, fallback, "computed dimension unresolved, applying fallback");
            element.set_dimension(dimension, Length::px(fallback));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StyleValue, parse_style_value, resolve_dimension};
    use crate::core::{Dimension, Length};
    use crate::host::DetachedElement;

    #[test]
    fn pixel_suffix_is_stripped() {
        assert_eq!(parse_style_value("300px"), StyleValue::Pixels(300.0));
        assert_eq!(parse_style_value("12.5px"), StyleValue::Pixels(12.5));
        assert_eq!(parse_style_value("80"), StyleValue::Pixels(80.0));
    }

    #[test]
    fn non_pixel_values_stay_raw() {
        assert_eq!(parse_style_value("auto"), StyleValue::Raw("auto".to_owned()));
        assert_eq!(parse_style_value("50%"), StyleValue::Raw("50%".to_owned()));
        assert_eq!(parse_style_value(""), StyleValue::Raw(String::new()));
    }

    #[test]
    fn zero_size_falls_back_and_writes_back() {
        let mut element = DetachedElement::new();
        let resolved = resolve_dimension(&mut element, Dimension::Width, 200.0);
        assert_eq!(resolved, 200.0);
        assert_eq!(element.explicit(Dimension::Width), Some(Length::px(200.0)));
    }

    #[test]
    fn resolved_size_leaves_element_untouched() {
        let mut element =
            DetachedElement::new().with_dimension(Dimension::Width, Length::px(320.0));
        let writes_before = element.write_count();
        let resolved = resolve_dimension(&mut element, Dimension::Width, 200.0);
        assert_eq!(resolved, 320.0);
        assert_eq!(element.write_count(), writes_before);
    }
}
