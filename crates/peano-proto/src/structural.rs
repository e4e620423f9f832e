//! `Copy` and `Succ`: forward a numeral, or forward it plus one.

use peano_wire::{NumeralRx, NumeralTx, Signal, Token};

use crate::error::Result;

/// Forward `input` onto `out` unchanged.
///
/// Each successor read is relayed with its token (the `Succ` step); the zero
/// signal is relayed and ends the process.
pub fn copy(input: NumeralRx, mut out: NumeralTx) -> Result<()> {
    loop {
        match input.next()? {
            Signal::Successor(token) => out.successor(token)?,
            Signal::Zero(token) => return Ok(out.zero(token)?),
        }
    }
}

/// Fire one extra successor onto `out`, then copy `input`.
pub fn succ(input: NumeralRx, mut out: NumeralTx) -> Result<()> {
    out.successor(Token::new())?;
    copy(input, out)
}

#[cfg(test)]
mod tests {
    use peano_wire::numeral;

    use super::*;
    use crate::error::ProtocolError;
    use crate::process::Spawner;
    use crate::testing::{sink, source};

    #[test]
    fn copy_preserves_value() {
        let spawner = Spawner::new();
        for n in [0, 1, 9] {
            let input = source(&spawner, n);
            assert_eq!(sink(&spawner, move |out| copy(input, out)), n);
        }
    }

    #[test]
    fn succ_increments_value() {
        let spawner = Spawner::new();
        for n in [0, 1, 9] {
            let input = source(&spawner, n);
            assert_eq!(sink(&spawner, move |out| succ(input, out)), n + 1);
        }
    }

    #[test]
    fn chained_succ() {
        let spawner = Spawner::new();
        let input = source(&spawner, 2);
        let (mid_tx, mid_rx) = numeral();
        let first = spawner
            .spawn("succ", move || succ(input, mid_tx))
            .expect("succ should spawn");

        assert_eq!(sink(&spawner, move |out| succ(mid_rx, out)), 4);
        first.join().expect("first succ should complete");
    }

    #[test]
    fn copy_of_abandoned_input_fails() {
        let (input_tx, input_rx) = numeral();
        let (out_tx, _out_rx) = numeral();
        drop(input_tx);

        assert!(matches!(
            copy(input_rx, out_tx),
            Err(ProtocolError::Wire(_))
        ));
    }
}
