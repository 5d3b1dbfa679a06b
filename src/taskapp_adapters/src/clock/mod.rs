pub mod fixed_clock;
pub mod system_clock;

pub use fixed_clock::FixedClock;
pub use system_clock::SystemClock;
