//! House parameters
//!
//! The three numeric inputs that drive the whole visualisation. Everything
//! visible in a scene (except fixed styling constants) is re-derived from
//! these values alone; there is no hidden parameter state anywhere else.

/// Valid bedroom range (inclusive)
pub const BEDROOMS_RANGE: (u32, u32) = (1, 20);
/// Valid bathroom range (inclusive)
pub const BATHROOMS_RANGE: (u32, u32) = (1, 10);
/// Valid floor area range in square feet (inclusive)
pub const AREA_RANGE: (u32, u32) = (500, 10_000);
/// Floor area slider granularity in square feet
pub const AREA_STEP: u32 = 100;

/// The parameter triple driving both scene variants
///
/// Mutable only through the clamping setters, so a `HouseParams` value is
/// always inside the slider ranges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HouseParams {
    bedrooms: u32,
    bathrooms: u32,
    area_sq_ft: u32,
}

impl Default for HouseParams {
    fn default() -> Self {
        Self {
            bedrooms: 3,
            bathrooms: 2,
            area_sq_ft: 2000,
        }
    }
}

impl HouseParams {
    /// Creates a parameter set, clamping each value into its valid range
    pub fn new(bedrooms: u32, bathrooms: u32, area_sq_ft: u32) -> Self {
        let mut params = Self::default();
        params.set_bedrooms(bedrooms);
        params.set_bathrooms(bathrooms);
        params.set_area_sq_ft(area_sq_ft);
        params
    }

    pub fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    pub fn area_sq_ft(&self) -> u32 {
        self.area_sq_ft
    }

    pub fn set_bedrooms(&mut self, bedrooms: u32) {
        self.bedrooms = bedrooms.clamp(BEDROOMS_RANGE.0, BEDROOMS_RANGE.1);
    }

    pub fn set_bathrooms(&mut self, bathrooms: u32) {
        self.bathrooms = bathrooms.clamp(BATHROOMS_RANGE.0, BATHROOMS_RANGE.1);
    }

    /// Sets the floor area, snapping to [`AREA_STEP`] increments
    pub fn set_area_sq_ft(&mut self, area_sq_ft: u32) {
        let clamped = area_sq_ft.clamp(AREA_RANGE.0, AREA_RANGE.1);
        self.area_sq_ft = (clamped / AREA_STEP) * AREA_STEP;
    }

    /// Uniform scale factor applied to the whole house root
    ///
    /// `0.6 + bedrooms / 40 + area / 15000`, monotonic increasing in both
    /// bedrooms and area. Over the valid ranges this spans roughly
    /// [0.69, 1.77].
    pub fn scale_factor(&self) -> f32 {
        0.6 + self.bedrooms as f32 / 40.0 + self.area_sq_ft as f32 / 15_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp_to_range() {
        let mut params = HouseParams::default();
        params.set_bedrooms(0);
        assert_eq!(params.bedrooms(), 1);
        params.set_bedrooms(99);
        assert_eq!(params.bedrooms(), 20);
        params.set_bathrooms(25);
        assert_eq!(params.bathrooms(), 10);
        params.set_area_sq_ft(100);
        assert_eq!(params.area_sq_ft(), 500);
        params.set_area_sq_ft(50_000);
        assert_eq!(params.area_sq_ft(), 10_000);
    }

    #[test]
    fn test_area_snaps_to_step() {
        let mut params = HouseParams::default();
        params.set_area_sq_ft(2345);
        assert_eq!(params.area_sq_ft(), 2300);
    }

    #[test]
    fn test_scale_factor_reference_values() {
        let params = HouseParams::new(3, 2, 2000);
        assert!((params.scale_factor() - 0.808_333_3).abs() < 1e-5);

        let smallest = HouseParams::new(1, 1, 500);
        assert!((smallest.scale_factor() - 0.633_333_3).abs() < 1e-5);

        let large = HouseParams::new(8, 10, 10_000);
        assert!((large.scale_factor() - 1.466_666_6).abs() < 1e-5);
    }

    #[test]
    fn test_scale_factor_monotonic() {
        let base = HouseParams::new(4, 2, 3000);
        let more_bedrooms = HouseParams::new(5, 2, 3000);
        let more_area = HouseParams::new(4, 2, 3100);
        assert!(more_bedrooms.scale_factor() > base.scale_factor());
        assert!(more_area.scale_factor() > base.scale_factor());
    }
}
