/// Documentation of one JSON input field, generated by `#[derive(InputFields)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}
