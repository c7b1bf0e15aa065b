//! Teacher popup markup

use super::geojson::MarkerProperties;

/// Shift `feature_lng` by whole turns until it is on the world copy nearest
/// `click_lng`
///
/// Non-finite input is returned unchanged.
pub fn wrap_longitude(feature_lng: f64, click_lng: f64) -> f64 {
    let delta = click_lng - feature_lng;
    if !delta.is_finite() || delta.abs() <= 180.0 {
        return feature_lng;
    }
    feature_lng + (delta / 360.0).round() * 360.0
}

/// Popup describing one teacher marker
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherPopup<'a> {
    properties: &'a MarkerProperties,
}

impl<'a> TeacherPopup<'a> {
    pub fn new(properties: &'a MarkerProperties) -> Self {
        Self { properties }
    }

    /// HTML fragment; the button carries `data-teacher-id` for the host's
    /// "view profile" handler
    pub fn render_html(&self) -> String {
        let p = self.properties;

        let name = if p.name.trim().is_empty() {
            crate::i18n::t!("map.popup.default_name").to_string()
        } else {
            p.name.clone()
        };
        let rating = if p.rating > 0.0 {
            p.rating.to_string()
        } else {
            "\u{2014}".to_string()
        };
        let price = if p.price > 0.0 {
            p.price.to_string()
        } else {
            String::new()
        };

        format!(
            concat!(
                r#"<div class="teacher-popup">"#,
                r#"<strong>{name}</strong>"#,
                r#"<div class="subject">{subject}</div>"#,
                r#"<div class="rating"><span class="star">&#9733;</span> {rating} <span class="reviews">({reviews})</span></div>"#,
                r#"<div class="price">{price} {per_hour}</div>"#,
                r#"<button type="button" data-teacher-id="{id}">{view_profile}</button>"#,
                r#"</div>"#
            ),
            name = html_escape::encode_text(&name),
            subject = html_escape::encode_text(&p.subject),
            rating = rating,
            reviews = p.reviews,
            price = price,
            per_hour = html_escape::encode_text(&crate::i18n::t!("map.popup.per_hour")),
            id = p.id,
            view_profile = html_escape::encode_text(&crate::i18n::t!("map.popup.view_profile")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties() -> MarkerProperties {
        MarkerProperties {
            id: 42,
            name: "Omar <Tutor>".into(),
            subject: String::new(),
            rating: 4.5,
            reviews: 0,
            price: 200.0,
            is_featured: false,
            distance_km: 3.0,
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(31.2, 31.0), 31.2);
        assert_eq!(wrap_longitude(170.0, -170.0), -190.0);
        assert_eq!(wrap_longitude(-170.0, 175.0), 190.0);
        assert_eq!(wrap_longitude(10.0, 730.0), 730.0);
        assert_eq!(wrap_longitude(0.0, 180.0), 0.0);
    }

    #[test]
    fn test_wrap_longitude_extreme_input() {
        assert!(wrap_longitude(1e300, 31.0).is_finite());
        assert!(wrap_longitude(31.0, -1e300).is_finite());
        assert_eq!(wrap_longitude(f64::INFINITY, 31.0), f64::INFINITY);
        assert!(wrap_longitude(f64::NAN, 31.0).is_nan());
    }

    #[test]
    #[serial_test::serial(locale)]
    fn test_render_escapes_and_links() {
        let props = properties();
        let html = TeacherPopup::new(&props).render_html();

        assert!(html.contains("Omar &lt;Tutor&gt;"));
        assert!(html.contains(r#"data-teacher-id="42""#));
        assert!(html.contains("4.5"));
        assert!(html.contains("200 EGP/hr"));
        assert!(html.contains("View Profile"));
    }

    #[test]
    #[serial_test::serial(locale)]
    fn test_render_placeholders() {
        let props = MarkerProperties {
            name: String::new(),
            rating: 0.0,
            ..properties()
        };
        let html = TeacherPopup::new(&props).render_html();

        assert!(html.contains("<strong>Teacher</strong>"));
        assert!(html.contains('\u{2014}'));
    }
}
