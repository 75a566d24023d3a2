pub mod log;
pub mod program;
pub mod state;

pub use log::{LinearLog, LogBook, LogKey, StructuredLog, VolumeLog};
pub use program::{
  ExerciseItem, ProgramDefinition, SetDescriptor, SetScheme, VolumeWeek, WeightUnit,
};
pub use state::{TrainingLogs, TrainingState};
