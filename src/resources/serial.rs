//! Serial ports, `ASRL[board]::INSTR`.

use super::{apply_read_termination, impl_message_based, resource_wrapper, SerialAttributes};
use crate::{enums::attribute::SerialTermination, Result};

resource_wrapper! {
    /// A serial port. The read termination also drives `VI_ATTR_ASRL_END_IN`,
    /// so reads stop at the termination character.
    pub struct SerialInstrument:
        ResourceAttributes,
        MessageBasedAttributes,
        SuppressEndAttributes,
        SerialAttributes;
    message_based
}

impl_message_based!(SerialInstrument {
    fn set_read_termination(&mut self, termination: Option<&str>) -> Result<()> {
        let termination = termination.filter(|t| !t.is_empty());
        apply_read_termination(&self.session, termination)?;
        self.set_end_input(match termination {
            Some(_) => SerialTermination::Termchar,
            None => SerialTermination::None,
        })?;
        self.io.read_termination = termination.map(str::to_string);
        Ok(())
    }
});
