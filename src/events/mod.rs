//! # Events Module
//!
//! Progress events emitted by the batch runner.
//!
//! ## Design
//! The runner emits events through a channel so any front end can
//! display progress without the core knowing about it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Row(RowEvent::Written { index, .. }) = event {
//!             println!("row {} done", index);
//!         }
//!     }
//! });
//!
//! runner.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
