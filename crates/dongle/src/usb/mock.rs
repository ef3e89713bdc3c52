//! Recording test doubles for the bus and port seams
//!
//! `MockPort` and `MockBus` log every device interaction into a shared
//! `OpLog`, letting tests assert the exact sequence a scenario produces
//! without hardware on the bus.

use crate::usb::port::{DongleBus, DonglePort};
use common::Result;
use protocol::{BOOTLOADER_EXIT_ACK, DEVICE_MAGIC, DeviceMode, DongleId};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Every device interaction performed by a mock, in order.
#[derive(Debug, PartialEq, Eq)]
pub enum Op {
    KernelDriverQuery { interface: u8 },
    DetachKernelDriver { interface: u8 },
    ClaimInterface { interface: u8 },
    WriteBulk { endpoint: u8, data: Vec<u8> },
    ReadBulk { endpoint: u8, len: usize },
    ReadControl { request_type: u8, request: u8, value: u16, index: u16, len: usize },
    WriteControl { request_type: u8, request: u8, value: u16, index: u16, data: Vec<u8> },
    Settle,
    Locate,
}

pub type OpLog = Rc<RefCell<Vec<Op>>>;

pub fn op_log() -> OpLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockPort {
    identity: DongleId,
    log: OpLog,
    /// Kernel driver state per interface, indexed by interface number.
    pub driver_active: [bool; 2],
    /// Byte returned for the bootloader exit ack read.
    pub exit_ack: u8,
    /// Error to return instead of the exit ack, if set.
    pub ack_read_error: Option<rusb::Error>,
    /// Bytes returned for the magic read.
    pub magic: [u8; 4],
}

impl MockPort {
    /// Well-behaved port enumerated under `mode`'s canonical identity.
    pub fn new(mode: DeviceMode, log: OpLog) -> Self {
        Self::with_identity(mode.id(), log)
    }

    pub fn with_identity(identity: DongleId, log: OpLog) -> Self {
        Self {
            identity,
            log,
            driver_active: [true, true],
            exit_ack: BOOTLOADER_EXIT_ACK,
            ack_read_error: None,
            magic: DEVICE_MAGIC,
        }
    }
}

impl DonglePort for MockPort {
    fn identity(&self) -> DongleId {
        self.identity
    }

    fn kernel_driver_active(&mut self, interface: u8) -> Result<bool> {
        self.log
            .borrow_mut()
            .push(Op::KernelDriverQuery { interface });
        Ok(self.driver_active[interface as usize])
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> Result<()> {
        self.log
            .borrow_mut()
            .push(Op::DetachKernelDriver { interface });
        Ok(())
    }

    fn claim_interface(&mut self, interface: u8) -> Result<()> {
        self.log.borrow_mut().push(Op::ClaimInterface { interface });
        Ok(())
    }

    fn write_bulk(&mut self, endpoint: u8, data: &[u8]) -> Result<usize> {
        self.log.borrow_mut().push(Op::WriteBulk {
            endpoint,
            data: data.to_vec(),
        });
        Ok(data.len())
    }

    fn read_bulk(&mut self, endpoint: u8, buf: &mut [u8]) -> Result<usize> {
        self.log.borrow_mut().push(Op::ReadBulk {
            endpoint,
            len: buf.len(),
        });
        if let Some(e) = self.ack_read_error.take() {
            return Err(e.into());
        }
        buf[0] = self.exit_ack;
        Ok(1)
    }

    fn read_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize> {
        self.log.borrow_mut().push(Op::ReadControl {
            request_type,
            request,
            value,
            index,
            len: buf.len(),
        });
        buf[..4].copy_from_slice(&self.magic);
        Ok(4)
    }

    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        self.log.borrow_mut().push(Op::WriteControl {
            request_type,
            request,
            value,
            index,
            data: data.to_vec(),
        });
        Ok(data.len())
    }
}

pub struct MockBus {
    log: OpLog,
    /// Ports handed out by successive locate() calls.
    queued: VecDeque<MockPort>,
}

impl MockBus {
    /// Bus with nothing attached; `queue` ports to make locates succeed.
    pub fn new(log: OpLog) -> Self {
        Self {
            log,
            queued: VecDeque::new(),
        }
    }

    pub fn queue(&mut self, port: MockPort) {
        self.queued.push_back(port);
    }
}

impl DongleBus for MockBus {
    type Port = MockPort;

    fn locate(&mut self) -> Result<Option<MockPort>> {
        self.log.borrow_mut().push(Op::Locate);
        Ok(self.queued.pop_front())
    }

    fn settle(&mut self) {
        self.log.borrow_mut().push(Op::Settle);
    }
}
