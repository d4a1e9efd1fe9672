//! Drop-vs-bucket catch test
//!
//! A catch needs the drop's bottom edge inside a fixed band starting at the
//! bucket's top edge, and the drop's horizontal center over the bucket.
//! Geometry is sampled, not swept: a drop that crosses the whole band between
//! two polls is not caught.

use super::state::{Bucket, FallingEntity};
use crate::config::FieldGeometry;
use crate::consts::CATCH_BAND;

/// Result of a catch check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catch {
    NoHit,
    Hit,
}

/// Check whether the bucket catches the drop at its current position
pub fn check(entity: &FallingEntity, bucket: &Bucket, geometry: &FieldGeometry) -> Catch {
    let bottom = entity.bottom(geometry.entity_height);
    let band_top = geometry.bucket_top();
    let in_band = bottom >= band_top && bottom <= band_top + CATCH_BAND;

    let center = entity.center_x(geometry.entity_width);
    let over_bucket = center >= bucket.x && center <= bucket.right();

    if in_band && over_bucket {
        Catch::Hit
    } else {
        Catch::NoHit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_at(x: f32, bottom: f32, geo: &FieldGeometry) -> FallingEntity {
        let mut drop = FallingEntity::new(1, x, true, 3.0, geo.height);
        drop.pos.y = bottom - geo.entity_height;
        drop
    }

    #[test]
    fn test_hit_in_band() {
        let geo = FieldGeometry::default();
        let bucket = Bucket::centered(&geo); // x 350..450, top 430

        // Center at 400, bottom just past the top edge
        let drop = drop_at(385.0, 435.0, &geo);
        assert_eq!(check(&drop, &bucket, &geo), Catch::Hit);
    }

    #[test]
    fn test_band_edges_inclusive() {
        let geo = FieldGeometry::default();
        let bucket = Bucket::centered(&geo);
        let top = geo.bucket_top();

        assert_eq!(check(&drop_at(385.0, top, &geo), &bucket, &geo), Catch::Hit);
        assert_eq!(
            check(&drop_at(385.0, top + CATCH_BAND, &geo), &bucket, &geo),
            Catch::Hit
        );
        assert_eq!(
            check(&drop_at(385.0, top - 0.5, &geo), &bucket, &geo),
            Catch::NoHit
        );
        assert_eq!(
            check(&drop_at(385.0, top + CATCH_BAND + 0.5, &geo), &bucket, &geo),
            Catch::NoHit
        );
    }

    #[test]
    fn test_horizontal_center_rule() {
        let geo = FieldGeometry::default();
        let bucket = Bucket::centered(&geo);
        let bottom = geo.bucket_top() + 10.0;

        // Center exactly on the left edge (350) counts
        assert_eq!(check(&drop_at(335.0, bottom, &geo), &bucket, &geo), Catch::Hit);
        // Overlapping but center outside does not
        assert_eq!(
            check(&drop_at(334.0, bottom, &geo), &bucket, &geo),
            Catch::NoHit
        );
        // Center exactly on the right edge (450) counts
        assert_eq!(check(&drop_at(435.0, bottom, &geo), &bucket, &geo), Catch::Hit);
        assert_eq!(
            check(&drop_at(436.0, bottom, &geo), &bucket, &geo),
            Catch::NoHit
        );
    }

    #[test]
    fn test_sampling_can_skip_band() {
        let geo = FieldGeometry::default();
        let bucket = Bucket::centered(&geo);
        let top = geo.bucket_top();

        // Two samples 45px apart straddle the 40px band
        let before = drop_at(385.0, top - 2.0, &geo);
        let after = drop_at(385.0, top + CATCH_BAND + 3.0, &geo);
        assert_eq!(check(&before, &bucket, &geo), Catch::NoHit);
        assert_eq!(check(&after, &bucket, &geo), Catch::NoHit);
    }
}
