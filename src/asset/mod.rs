pub(crate) mod frames;
pub(crate) mod lottie;
pub(crate) mod player;
