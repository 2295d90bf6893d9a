pub mod access_events;
pub mod lockers;
pub mod qr_sessions;
