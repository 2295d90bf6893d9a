pub mod qr_session;
pub mod scan;
