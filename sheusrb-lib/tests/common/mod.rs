//! Common test utilities: an in-memory serial device that records what happens to it

// Allow unused items since this module is shared across test files
#![allow(dead_code)]

use sheusrb_lib::{Connector, PortSettings, SheusrbError};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub use sheusrb_lib::constants::FIXED_PAYLOAD;

/// Everything the mock device observed, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open(String),
    Write(Vec<u8>),
    Flush,
    Close,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// How the mock device behaves
#[derive(Debug, Clone, Copy, Default)]
pub enum Behavior {
    /// Accept every byte
    #[default]
    Healthy,
    /// Refuse to open, as if the path did not exist
    Missing,
    /// Accept this many bytes, then fail as if unplugged
    DisconnectAfter(usize),
    /// Open fine, but every write times out
    TimeOut,
}

#[derive(Clone, Default)]
pub struct MockConnector {
    pub behavior: Behavior,
    pub log: EventLog,
}

impl MockConnector {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            log: EventLog::default(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    /// Bytes that actually reached the "wire"
    pub fn bytes_written(&self) -> Vec<u8> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl Connector for MockConnector {
    type Port = MockPort;

    fn open(&self, settings: &PortSettings) -> Result<MockPort, SheusrbError> {
        if let Behavior::Missing = self.behavior {
            let source = serialport::Error::new(serialport::ErrorKind::NoDevice, "No such file or directory");
            return Err(SheusrbError::device_unavailable(&settings.path, source));
        }
        self.log.borrow_mut().push(Event::Open(settings.path.clone()));
        let budget = match self.behavior {
            Behavior::DisconnectAfter(n) => Some(n),
            _ => None,
        };
        Ok(MockPort {
            log: Rc::clone(&self.log),
            budget,
            timing_out: matches!(self.behavior, Behavior::TimeOut),
        })
    }
}

pub struct MockPort {
    log: EventLog,
    budget: Option<usize>,
    timing_out: bool,
}

impl Write for MockPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.timing_out {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "Operation timed out"));
        }
        let accepted = match self.budget {
            None => buf.len(),
            Some(0) => return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device disconnected")),
            Some(left) => {
                let n = left.min(buf.len());
                self.budget = Some(left - n);
                n
            }
        };
        self.log.borrow_mut().push(Event::Write(buf[..accepted].to_vec()));
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

impl Drop for MockPort {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Event::Close);
    }
}
