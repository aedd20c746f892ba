//! A few well known codes, ready to hand to [`StabilizerCode::new`](super::StabilizerCode::new).

use crate::core::constants::steane;
use crate::core::{CodeLabel, LogicalError, StabilizerTableau};

/// The 7-qubit Steane code, `[[7,1,3]]`.
pub fn steane() -> Result<(StabilizerTableau, CodeLabel), LogicalError> {
    Ok((StabilizerTableau::new(&steane::TABLEAU)?, steane::LABEL.into()))
}

/// The 5-qubit perfect code, `[[5,1,3]]`.
pub fn five_qubit() -> Result<(StabilizerTableau, CodeLabel), LogicalError> {
    let tableau = StabilizerTableau::new(&["XZZXI", "IXZZX", "XIXZZ", "ZXIXZ"])?;
    Ok((tableau, CodeLabel::new(5, 1, 3)))
}

/// Shor's 9-qubit code, `[[9,1,3]]`.
pub fn shor() -> Result<(StabilizerTableau, CodeLabel), LogicalError> {
    let tableau = StabilizerTableau::new(&[
        "ZZIIIIIII",
        "IZZIIIIII",
        "IIIZZIIII",
        "IIIIZZIII",
        "IIIIIIZZI",
        "IIIIIIIZZ",
        "XXXXXXIII",
        "IIIXXXXXX",
    ])?;
    Ok((tableau, CodeLabel::new(9, 1, 3)))
}
