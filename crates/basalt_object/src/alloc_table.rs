//! # Allocation Table
//!
//! Registry of managed-heap blocks that have been allocated but not yet
//! claimed by an object installed at that address. The managed heap records
//! every block here before any value exists at the address; installing an
//! object consumes the matching entry, and the presence or absence of that
//! entry is what decides the object's initial ownership regime (see
//! [`crate::object::ObjectCore`]).
//!
//! # Thread Safety
//!
//! A table is NOT thread-safe. The process-wide instance is sharded per
//! thread (`thread_local!`), which is also what makes the record/claim pair
//! sound: nothing else can touch the shard between the two calls.

use std::cell::RefCell;

/// Number of node slots pre-allocated per table.
///
/// The pending window of a single construction is one entry, so the pool
/// only grows when that many constructions are simultaneously in flight.
const POOL_CAPACITY: usize = 32;

/// One pending heap block: its address plus doubly-linked list neighbors.
///
/// Nodes live in the table's slot pool and link to each other by slot
/// index, in the same index-linking style as a pool free list.
#[derive(Clone, Copy, Debug)]
struct Allocation {
    /// Address of the block returned by the managed heap.
    address: usize,
    /// Slot index of the previous pending allocation.
    previous: Option<u32>,
    /// Slot index of the next pending allocation.
    next: Option<u32>,
}

/// Append/remove registry of heap addresses awaiting claim.
///
/// `record` is O(1) (head insertion); `claim` is O(pending) (list scan).
/// Absence of a match from `claim` is a normal outcome meaning "this
/// address was not produced by the managed heap", not an error.
#[derive(Debug)]
pub struct AllocationTable {
    /// Node storage. Slots are pre-allocated and recycled through
    /// `free_list`; the vector grows only when every slot is pending.
    slots: Vec<Option<Allocation>>,
    /// Indices of available slots.
    free_list: Vec<u32>,
    /// Slot index of the most recently recorded allocation.
    head: Option<u32>,
    /// Number of currently pending allocations.
    pending: usize,
}

impl AllocationTable {
    /// Creates a table with the default pool capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(POOL_CAPACITY)
    }

    /// Creates a table with `capacity` pre-allocated node slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        let free_list: Vec<u32> = (0..capacity as u32).rev().collect();
        Self {
            slots,
            free_list,
            head: None,
            pending: 0,
        }
    }

    /// Records a freshly allocated block address.
    ///
    /// Inserts at the head of the list. No duplicate checking: the managed
    /// heap never records the same live address twice, and a stale
    /// duplicate would mean a missing claim elsewhere.
    pub fn record(&mut self, address: usize) {
        let index = self.acquire_slot();
        if let Some(old_head) = self.head {
            if let Some(node) = self.slots[old_head as usize].as_mut() {
                node.previous = Some(index);
            }
        }
        self.slots[index as usize] = Some(Allocation {
            address,
            previous: None,
            next: self.head,
        });
        self.head = Some(index);
        self.pending += 1;
    }

    /// Claims a pending address: unlinks its node and returns `true`, or
    /// returns `false` leaving the table unchanged when the address was
    /// never recorded (or already claimed).
    pub fn claim(&mut self, address: usize) -> bool {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(node) = self.slots[index as usize] else {
                debug_assert!(false, "list cursor reached an empty slot");
                return false;
            };
            if node.address == address {
                self.unlink(index, node.previous, node.next);
                return true;
            }
            cursor = node.next;
        }
        false
    }

    /// Returns `true` if `address` is currently pending.
    #[must_use]
    pub fn contains(&self, address: usize) -> bool {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(node) = self.slots[index as usize] else {
                return false;
            };
            if node.address == address {
                return true;
            }
            cursor = node.next;
        }
        false
    }

    /// Number of currently pending allocations.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Returns `true` when no allocation is pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Pops a free slot index, growing the pool when exhausted.
    fn acquire_slot(&mut self) -> u32 {
        if let Some(index) = self.free_list.pop() {
            index
        } else {
            self.slots.push(None);
            (self.slots.len() - 1) as u32
        }
    }

    /// Unlinks the node at `index` and recycles its slot.
    fn unlink(&mut self, index: u32, previous: Option<u32>, next: Option<u32>) {
        match previous {
            Some(prev_index) => {
                if let Some(node) = self.slots[prev_index as usize].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        if let Some(next_index) = next {
            if let Some(node) = self.slots[next_index as usize].as_mut() {
                node.previous = previous;
            }
        }
        self.slots[index as usize] = None;
        self.free_list.push(index);
        self.pending -= 1;
    }
}

impl Default for AllocationTable {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    /// This thread's shard of the process-wide pending-allocation registry.
    static PENDING: RefCell<AllocationTable> = RefCell::new(AllocationTable::new());
}

/// Records `address` in the calling thread's shard.
pub(crate) fn record(address: usize) {
    PENDING.with(|table| table.borrow_mut().record(address));
}

/// Claims `address` from the calling thread's shard.
pub(crate) fn claim(address: usize) -> bool {
    PENDING.with(|table| table.borrow_mut().claim(address))
}

/// Number of allocations pending on the calling thread.
///
/// Diagnostic only; a steady nonzero value here means a managed-heap block
/// was allocated but never installed.
#[must_use]
pub fn thread_pending() -> usize {
    PENDING.with(|table| table.borrow().pending())
}
