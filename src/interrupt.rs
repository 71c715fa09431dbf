/*
    This module handles Ctrl-C: a running search stops between expansions,
    anywhere else the program exits at once
*/

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const MESSAGE: &str = "Keyboard Interrupt detected. Exiting.";
pub const EXIT_CODE: u8 = 1;

#[derive(Debug, Default)]
pub struct Interrupt {
    requested: AtomicBool,
    searching: AtomicBool,
}

impl Interrupt {
    /// Registers the process-wide Ctrl-C handler. Can only be done once.
    pub fn install() -> Result<Arc<Interrupt>, ctrlc::Error> {
        let interrupt = Arc::new(Interrupt::default());
        let handle = Arc::clone(&interrupt);

        ctrlc::set_handler(move || {
            // A blocked prompt never polls the flag
            if !handle.request() {
                println!("\n{}", MESSAGE);
                process::exit(EXIT_CODE.into());
            }
        })?;

        Ok(interrupt)
    }

    // Returns whether a running search will see the request
    pub fn request(&self) -> bool {
        self.requested.store(true, Ordering::SeqCst);
        self.searching.load(Ordering::SeqCst)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }

    /// Marks a search as running until the guard is dropped.
    pub fn searching(&self) -> SearchGuard<'_> {
        self.searching.store(true, Ordering::SeqCst);
        SearchGuard { interrupt: self }
    }
}

pub struct SearchGuard<'a> {
    interrupt: &'a Interrupt,
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        self.interrupt.searching.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_outside_a_search_is_not_picked_up() {
        let interrupt = Interrupt::default();
        assert!(!interrupt.is_requested());

        assert!(!interrupt.request());
        assert!(interrupt.is_requested());
    }

    #[test]
    fn guard_covers_the_search_only() {
        let interrupt = Interrupt::default();
        {
            let _guard = interrupt.searching();
            assert!(interrupt.request());
        }
        assert!(!interrupt.request());
    }
}
