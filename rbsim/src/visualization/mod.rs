pub mod rbsim_vis2d;
pub mod headless;
