//! Material parameter editing pane.

use bxdf::MaterialParams;

/// Raw range of the sliders; positions map linearly onto `[0, 1]`.
const SLIDER_RANGE: std::ops::RangeInclusive<u32> = 0..=100;

/// Observer invoked with the updated pair on any parameter change.
pub type ParamsObserver = Box<dyn FnMut(MaterialParams)>;

/// Editor pane exposing the material parameters as two sliders.
///
/// The sliders operate on a raw integer range mapped to `[0, 1]` when the
/// parameters are read or emitted. A single observer can be registered and
/// is notified synchronously, exactly once per change, with the complete
/// updated pair.
pub struct MaterialEditor {
    roughness_raw: u32,
    metallic_raw: u32,
    observer: Option<ParamsObserver>,
}

impl MaterialEditor {
    /// Creates a new editor positioned at the given initial parameters.
    pub fn new(initial: MaterialParams) -> Self {
        Self {
            roughness_raw: param_to_raw(initial.roughness),
            metallic_raw: param_to_raw(initial.metallic),
            observer: None,
        }
    }

    /// Registers the observer notified on parameter changes, replacing any
    /// previously registered one.
    pub fn set_observer(&mut self, observer: ParamsObserver) { self.observer = Some(observer); }

    /// Returns the current material parameters.
    pub fn params(&self) -> MaterialParams {
        MaterialParams::new(
            raw_to_param(self.roughness_raw),
            raw_to_param(self.metallic_raw),
        )
    }

    /// Moves the sliders programmatically, notifying the observer the same
    /// way a user interaction would.
    pub fn set_raw(&mut self, roughness_raw: u32, metallic_raw: u32) {
        self.roughness_raw = roughness_raw.min(*SLIDER_RANGE.end());
        self.metallic_raw = metallic_raw.min(*SLIDER_RANGE.end());
        self.notify();
    }

    /// Shows the editor pane.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Material");
        ui.separator();
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Roughness");
            changed |= ui
                .add(egui::Slider::new(&mut self.roughness_raw, SLIDER_RANGE))
                .changed();
        });
        ui.horizontal(|ui| {
            ui.label("Metallic");
            changed |= ui
                .add(egui::Slider::new(&mut self.metallic_raw, SLIDER_RANGE))
                .changed();
        });
        // A single notification even when both sliders changed this frame.
        if changed {
            self.notify();
        }
        ui.separator();
        if ui.button("Reset").clicked() {
            let MaterialParams { roughness, metallic } = MaterialParams::default();
            self.set_raw(param_to_raw(roughness), param_to_raw(metallic));
        }
    }

    fn notify(&mut self) {
        let params = self.params();
        if let Some(observer) = self.observer.as_mut() {
            observer(params);
        }
    }
}

/// Maps a raw slider value onto the unit interval.
fn raw_to_param(raw: u32) -> f32 { raw as f32 / 100.0 }

/// Maps a parameter in `[0, 1]` onto the raw slider range.
fn param_to_raw(param: f32) -> u32 { (param.clamp(0.0, 1.0) * 100.0).round() as u32 }

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn raw_values_map_linearly_onto_unit_interval() {
        assert_eq!(raw_to_param(0), 0.0);
        assert_eq!(raw_to_param(100), 1.0);
        assert_abs_diff_eq!(raw_to_param(50), 0.5, epsilon = f32::EPSILON);
    }

    #[test]
    fn unit_interval_round_trips_through_raw_values() {
        for raw in 0..=100 {
            assert_eq!(param_to_raw(raw_to_param(raw)), raw);
        }
    }

    #[test]
    fn change_notifies_exactly_once_with_the_updated_pair() {
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let mut editor = MaterialEditor::new(MaterialParams::default());
        editor.set_observer({
            let sink = notifications.clone();
            Box::new(move |params| sink.borrow_mut().push(params))
        });

        editor.set_raw(30, 80);

        let seen = notifications.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], MaterialParams::new(0.3, 0.8));
        // The pair exposed afterwards is the pair that was emitted.
        assert_eq!(editor.params(), seen[0]);
    }

    #[test]
    fn raw_values_above_the_range_are_clamped_before_emission() {
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let mut editor = MaterialEditor::new(MaterialParams::default());
        editor.set_observer({
            let sink = notifications.clone();
            Box::new(move |params| sink.borrow_mut().push(params))
        });

        editor.set_raw(250, 101);

        assert_eq!(notifications.borrow()[0], MaterialParams::new(1.0, 1.0));
    }
}
