//! Parameter panel contents

use imgui::Ui;

use crate::params::{self, HouseParams};

/// Draws the three parameter sliders; returns true when any value changed
pub fn house_controls(ui: &Ui, params: &mut HouseParams) -> bool {
    let mut changed = false;

    ui.window("House Parameters")
        .size([320.0, 190.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.text("Both views follow these values");
            ui.separator();

            let mut bedrooms = params.bedrooms() as i32;
            if ui.slider(
                "Bedrooms",
                params::BEDROOMS_RANGE.0 as i32,
                params::BEDROOMS_RANGE.1 as i32,
                &mut bedrooms,
            ) {
                params.set_bedrooms(bedrooms as u32);
                changed = true;
            }

            let mut bathrooms = params.bathrooms() as i32;
            if ui.slider(
                "Bathrooms",
                params::BATHROOMS_RANGE.0 as i32,
                params::BATHROOMS_RANGE.1 as i32,
                &mut bathrooms,
            ) {
                params.set_bathrooms(bathrooms as u32);
                changed = true;
            }

            let mut area = params.area_sq_ft() as i32;
            if ui.slider(
                "Floor area (sq ft)",
                params::AREA_RANGE.0 as i32,
                params::AREA_RANGE.1 as i32,
                &mut area,
            ) {
                params.set_area_sq_ft(area as u32);
                changed = true;
            }

            ui.separator();
            ui.text(format!("House scale: {:.3}", params.scale_factor()));
        });

    changed
}
