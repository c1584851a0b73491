//! Instruction emitter (spec section 4.5–4.7): three cooperating
//! sub-emitters stitched together by the compilation driver.

pub mod chain;
pub mod normalize;
pub mod operator;
