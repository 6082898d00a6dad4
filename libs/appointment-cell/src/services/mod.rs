pub mod booking;
pub mod management;

pub use booking::BookingService;
pub use management::AppointmentService;
