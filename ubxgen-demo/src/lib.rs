//! # ubxgen Demo
//!
//! Records and dispatcher generated at build time for a small UBX schema:
//! NAV (POSLLH, SVINFO), INF (no messages), ACK (ACK, NAK), MON (VER) and
//! PM2 (PM2).
//!
//! ```ignore
//! use ubxgen_demo::{NAV, ParseUBX, ParseUBXHandler};
//!
//! struct Positions;
//!
//! impl ParseUBXHandler for Positions {
//!     fn onNAV_POSLLH(&mut self, msg: &NAV::POSLLH) {
//!         println!("{} {}", { msg.lon }, { msg.lat });
//!     }
//! }
//!
//! let mut frame = [0u8; 1024];
//! let mut parser = ParseUBX::new(&mut frame, Positions);
//! // SAFETY: the framing layer hands over a complete payload.
//! unsafe { parser.dispatch(class_id, message_id, len, payload) };
//! ```

include!(concat!(env!("OUT_DIR"), "/ParseUBX.rs"));
