use super::ActivityQueryService;
use crate::application::{
    dto::DateRangeDto,
    error::ApplicationResult,
};
use crate::domain::activity::DateRangePreset;

impl ActivityQueryService {
    /// Concrete dates for a preset button, relative to today in the office.
    pub fn resolve_preset(&self, preset: DateRangePreset) -> ApplicationResult<DateRangeDto> {
        let today = self.office_time.today(self.clock.now());
        let range = preset.resolve(today)?;
        Ok(DateRangeDto::from_preset(preset, range))
    }
}
