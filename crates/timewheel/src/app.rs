use crate::config::{self, Config};
use crate::error::PickerError;
use crate::events::AppEvent;
use crate::picker::{Picker, PointerEvent, RangeDescriptor};

/// What the host loop should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Idle,
    Emit(Vec<RangeDescriptor>),
    Quit,
}

pub struct AppModel {
    pub picker: Picker,
}

impl AppModel {
    pub fn new(config: &Config) -> Result<Self, PickerError> {
        let mut picker = Picker::new(&config.ranges, config.options())?;
        picker.set_surface(config.surface.into());
        Ok(Self { picker })
    }

    /// Applies a freshly loaded config. Pointer identities survive when the
    /// number of ranges is unchanged.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), PickerError> {
        let previous = self.picker.options().mode;
        self.picker.set_mode(config.mode);
        if let Err(e) = self.picker.set_value(&config.ranges) {
            self.picker.set_mode(previous);
            return Err(e);
        }
        self.picker.set_step(config.step);
        self.picker.set_detection_radius(config.detection_radius);
        self.picker.set_surface(config.surface.into());
        Ok(())
    }

    pub fn update(&mut self, event: AppEvent) -> Outcome {
        match event {
            AppEvent::DragStart { position, target } => {
                if self
                    .picker
                    .drag_start(PointerEvent { position, target })
                    .is_none()
                {
                    log::debug!("No pointer near {:?}", position);
                }
                Outcome::Idle
            }
            AppEvent::DragMove(position) => {
                self.picker.drag_move(position);
                Outcome::Idle
            }
            AppEvent::DragEnd => self.picker.drag_end().map_or(Outcome::Idle, Outcome::Emit),
            AppEvent::SetStep(step) => {
                self.picker.set_step(step);
                Outcome::Idle
            }
            AppEvent::SetValue(value) => {
                if let Err(e) = self.picker.set_value(&value) {
                    log::error!("Rejected value: {}", e);
                }
                Outcome::Idle
            }
            AppEvent::Print => Outcome::Emit(self.picker.value()),
            AppEvent::ConfigReload => {
                match config::load_config() {
                    Ok(new_config) => match self.apply_config(&new_config) {
                        Ok(()) => log::info!("Configuration reloaded"),
                        Err(e) => log::error!("Failed to apply config: {}", e),
                    },
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
                Outcome::Idle
            }
            AppEvent::Quit => Outcome::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PointerId;
    use clockface::geometry::{self, Point};

    fn model() -> AppModel {
        AppModel::new(&Config::default()).unwrap()
    }

    fn on_circle(time: f64) -> Point {
        geometry::coordinate_for_time(time, 0.0).point()
    }

    #[test]
    fn drag_cycle_emits_once() {
        let mut app = model();
        let start = AppEvent::DragStart {
            position: on_circle(8.0),
            target: None,
        };
        assert_eq!(app.update(start), Outcome::Idle);
        assert_eq!(app.update(AppEvent::DragMove(on_circle(6.5))), Outcome::Idle);
        assert_eq!(
            app.update(AppEvent::DragEnd),
            Outcome::Emit(vec![
                RangeDescriptor::new("06:30", "17:00"),
                RangeDescriptor::new("17:00", "06:30"),
            ])
        );
        assert_eq!(app.update(AppEvent::DragEnd), Outcome::Idle);
    }

    #[test]
    fn explicit_target_is_used() {
        let mut app = model();
        app.update(AppEvent::DragStart {
            position: Point::new(-1000.0, -1000.0),
            target: Some(PointerId::new(1)),
        });
        app.update(AppEvent::DragMove(on_circle(18.0)));
        let Outcome::Emit(value) = app.update(AppEvent::DragEnd) else {
            panic!("expected a change");
        };
        assert_eq!(value[0].end_time, "18:00");
    }

    #[test]
    fn bad_value_keeps_previous_ranges() {
        let mut app = model();
        let before = app.update(AppEvent::Print);
        app.update(AppEvent::SetValue(vec![RangeDescriptor::new("nope", "08:00")]));
        assert_eq!(app.update(AppEvent::Print), before);
    }

    #[test]
    fn apply_config_switches_mode() {
        let mut app = model();
        let config = Config {
            mode: clockface::clock::ClockMode::Twelve,
            ranges: vec![
                RangeDescriptor::new("9:00 AM", "1:00 PM"),
                RangeDescriptor::new("1:00 PM", "9:00 AM"),
            ],
            ..Config::default()
        };
        app.apply_config(&config).unwrap();
        assert_eq!(
            app.update(AppEvent::Print),
            Outcome::Emit(config.ranges.clone())
        );
        assert_eq!(app.update(AppEvent::Quit), Outcome::Quit);
    }
}
