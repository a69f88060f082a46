use itertools::Itertools;

/// Axis-aligned lon/lat bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Build the box covering all coordinates, None when the list is empty.
    pub fn from_coords<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f64; 2]> + Clone,
    {
        let lon = coords
            .clone()
            .into_iter()
            .map(|c| c[0])
            .minmax()
            .into_option()?;
        let lat = coords.into_iter().map(|c| c[1]).minmax().into_option()?;

        Some(Self {
            lon_min: lon.0,
            lon_max: lon.1,
            lat_min: lat.0,
            lat_max: lat.1,
        })
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.lon_min + self.lon_max) / 2.0,
            (self.lat_min + self.lat_max) / 2.0,
        )
    }

    /// Grow each side by `pct` of its span, enforcing `min_span` so a
    /// single-point track still produces a usable viewport.
    pub fn padded(&self, pct: f64, min_span: f64) -> Self {
        let lon_span = (self.lon_max - self.lon_min).max(min_span);
        let lat_span = (self.lat_max - self.lat_min).max(min_span);
        let (cx, cy) = self.center();

        let half_lon = lon_span * (0.5 + pct);
        let half_lat = lat_span * (0.5 + pct);
        Self {
            lon_min: cx - half_lon,
            lon_max: cx + half_lon,
            lat_min: cy - half_lat,
            lat_max: cy + half_lat,
        }
    }

    /// Lon-degrees per lat-degree so the track keeps its ground shape on an
    /// equirectangular plot. Clamped near the poles where cos(lat) collapses.
    pub fn equirect_aspect(&self) -> f64 {
        let (_, mid_lat) = self.center();
        let cos_lat = mid_lat.to_radians().cos().max(0.01);
        1.0 / cos_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_covers_all_points() {
        let coords = [[8.6, 50.1], [8.7, 50.0], [8.65, 50.2]];
        let bbox = BoundingBox::from_coords(coords.iter()).unwrap();

        assert_eq!(bbox.lon_min, 8.6);
        assert_eq!(bbox.lon_max, 8.7);
        assert_eq!(bbox.lat_min, 50.0);
        assert_eq!(bbox.lat_max, 50.2);
        for c in &coords {
            assert!(bbox.contains(c[0], c[1]));
        }
    }

    #[test]
    fn test_bbox_empty_input() {
        let coords: Vec<[f64; 2]> = vec![];
        assert!(BoundingBox::from_coords(coords.iter()).is_none());
    }

    #[test]
    fn test_padded_never_degenerate() {
        let coords = [[8.6821, 50.1109]];
        let bbox = BoundingBox::from_coords(coords.iter()).unwrap();
        let padded = bbox.padded(0.08, 0.002);

        assert!(padded.lon_max - padded.lon_min >= 0.002);
        assert!(padded.lat_max - padded.lat_min >= 0.002);
        assert!(padded.contains(8.6821, 50.1109));
    }

    #[test]
    fn test_equirect_aspect_widens_at_high_latitude() {
        let equator = BoundingBox {
            lon_min: -1.0,
            lon_max: 1.0,
            lat_min: -1.0,
            lat_max: 1.0,
        };
        let frankfurt = BoundingBox {
            lon_min: 8.6,
            lon_max: 8.8,
            lat_min: 50.0,
            lat_max: 50.2,
        };
        assert!((equator.equirect_aspect() - 1.0).abs() < 1e-6);
        assert!(frankfurt.equirect_aspect() > 1.5);
    }
}
