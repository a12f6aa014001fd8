use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary class label for a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Ham,
    Spam,
}

impl FromStr for Label {
    type Err = ();

    fn from_str(input: &str) -> Result<Label, Self::Err> {
        match input.to_lowercase().as_str() {
            "ham" => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham => write!(f, "Ham"),
            Label::Spam => write!(f, "Spam"),
        }
    }
}
