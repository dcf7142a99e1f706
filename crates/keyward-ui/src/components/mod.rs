pub(crate) mod atoms;
pub(crate) mod dropdown;
pub(crate) mod toast;
