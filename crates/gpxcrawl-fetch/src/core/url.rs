use crate::data::Tile;

/// Request URL for one page of trackpoints inside `tile`.
pub fn trackpoints_url(base_url: &str, tile: &Tile, page: u32) -> String {
    format!("{base_url}?bbox={}&page={page}", tile.bbox_param())
}
