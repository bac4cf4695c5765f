use crate::config::OrganizerConfig;
use crate::geometry::Rect;
use crate::models::Region;

/// A text region that survived filtering, reduced to what line merging needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LineToken {
    pub text: String,
    pub y: i32,
}

/// Keep confident, non-chrome text whose top-left corner lies in `client_area`.
/// Input order is preserved.
pub fn select_tokens(
    regions: &[Region],
    client_area: Rect,
    config: &OrganizerConfig,
) -> Vec<LineToken> {
    let marker = config.overlay_marker.to_lowercase();

    regions
        .iter()
        .filter(|region| region.is_text())
        .filter(|region| region.confidence >= config.min_confidence)
        .filter_map(|region| {
            let content = region.content.as_deref()?;
            if content.trim().is_empty() {
                return None;
            }
            if config.menu_tokens.iter().any(|menu| menu == content) {
                return None;
            }
            if !marker.is_empty() && content.to_lowercase().contains(&marker) {
                return None;
            }
            if !client_area.contains_point_inclusive(region.top_left()) {
                return None;
            }
            Some(LineToken {
                text: content.trim().to_string(),
                y: region.bounds.y,
            })
        })
        .collect()
}
