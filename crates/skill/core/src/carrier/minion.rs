use super::{Carrier, CarrierBody};

/// Minions carry no variant state of their own; behaviour lives in handlers
/// and the host's AI.
#[derive(Clone, Debug, Default)]
pub struct MinionBody {
    /// Index within the cast's fan-out.
    pub index: u32,
}

impl Carrier {
    pub(super) fn init_minion(&mut self) {
        self.tick_enabled = !self.handlers.is_empty();
    }

    pub fn set_minion_index(&mut self, index: u32) {
        if let CarrierBody::Minion(body) = &mut self.body {
            body.index = index;
        }
    }
}
