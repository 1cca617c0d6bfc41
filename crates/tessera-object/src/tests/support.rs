//! Payload doubles shared by the object tests.

use std::any::Any;
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use crate::{
    Comparable, Hashable, Initializable, Loggable, OBJECT_TYPE, ObjectType, Runnable,
    TypeDescriptor,
};

pub(super) static WIDGET_TYPE: TypeDescriptor = TypeDescriptor::derived("widget", &OBJECT_TYPE);
pub(super) static GADGET_TYPE: TypeDescriptor = TypeDescriptor::derived("gadget", &WIDGET_TYPE);

/// Records how often lifecycle hooks fired.
#[derive(Debug, Default)]
pub(super) struct HookLedger {
    inits: AtomicUsize,
    deinits: AtomicUsize,
}

impl HookLedger {
    pub(super) fn inits(&self) -> usize {
        self.inits.load(AtomicOrdering::SeqCst)
    }

    pub(super) fn deinits(&self) -> usize {
        self.deinits.load(AtomicOrdering::SeqCst)
    }
}

/// Payload implementing every capability.
#[derive(Debug)]
pub(super) struct Gadget {
    pub(super) weight: u32,
    pub(super) ledger: Arc<HookLedger>,
    pub(super) refuse_init: bool,
}

impl Gadget {
    pub(super) fn new(weight: u32) -> (Self, Arc<HookLedger>) {
        let ledger = Arc::new(HookLedger::default());
        (
            Self {
                weight,
                ledger: Arc::clone(&ledger),
                refuse_init: false,
            },
            ledger,
        )
    }
}

impl ObjectType for Gadget {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &GADGET_TYPE
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }

    fn as_hashable(&self) -> Option<&dyn Hashable> {
        Some(self)
    }

    fn as_comparable(&self) -> Option<&dyn Comparable> {
        Some(self)
    }

    fn as_runnable(&self) -> Option<&dyn Runnable> {
        Some(self)
    }

    fn as_loggable(&self) -> Option<&dyn Loggable> {
        Some(self)
    }
}

impl Initializable for Gadget {
    fn init(&mut self) -> bool {
        self.ledger.inits.fetch_add(1, AtomicOrdering::SeqCst);
        !self.refuse_init
    }

    fn deinit(&mut self) -> bool {
        self.ledger.deinits.fetch_add(1, AtomicOrdering::SeqCst);
        true
    }
}

impl Hashable for Gadget {
    fn hash_value(&self) -> u64 {
        u64::from(self.weight) * 31
    }
}

impl Comparable for Gadget {
    fn compare(&self, other: &dyn Any) -> Option<Ordering> {
        other
            .downcast_ref::<Self>()
            .map(|gadget| self.weight.cmp(&gadget.weight))
    }
}

impl Runnable for Gadget {
    fn run(&self) -> bool {
        self.weight > 0
    }
}

impl Loggable for Gadget {
    fn describe(&self) -> String {
        format!("gadget weighing {}", self.weight)
    }
}

/// Payload with no capabilities at all.
#[derive(Debug)]
pub(super) struct Plain;

impl ObjectType for Plain {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &WIDGET_TYPE
    }
}
