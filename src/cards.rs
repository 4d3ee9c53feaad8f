use std::fmt;
use std::str::FromStr;

/// Number of symbols printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Count {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Count {
    pub const ALL: [Count; 3] = [Count::One, Count::Two, Count::Three];

    pub const fn index(self) -> u8 {
        self as u8 - 1
    }

    pub const fn to_char(self) -> char {
        match self {
            Count::One => '1',
            Count::Two => '2',
            Count::Three => '3',
        }
    }

    pub fn from_index(index: u8) -> Result<Self, CardError> {
        match index {
            0 => Ok(Count::One),
            1 => Ok(Count::Two),
            2 => Ok(Count::Three),
            _ => Err(CardError::Index { attribute: "count", index }),
        }
    }
}

impl TryFrom<u8> for Count {
    type Error = CardError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1..=3 => Count::from_index(v - 1),
            _ => Err(CardError::Count(v)),
        }
    }
}

impl TryFrom<char> for Count {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '1' => Ok(Count::One),
            '2' => Ok(Count::Two),
            '3' => Ok(Count::Three),
            _ => Err(CardError::Code { attribute: "count", code: c }),
        }
    }
}

/// Fill of the symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shading {
    Solid,
    Striped,
    Open,
}

impl Shading {
    pub const ALL: [Shading; 3] = [Shading::Solid, Shading::Striped, Shading::Open];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Shading::Solid => 's',
            Shading::Striped => 'p',
            Shading::Open => 'b',
        }
    }

    pub fn from_index(index: u8) -> Result<Self, CardError> {
        match index {
            0 => Ok(Shading::Solid),
            1 => Ok(Shading::Striped),
            2 => Ok(Shading::Open),
            _ => Err(CardError::Index { attribute: "shading", index }),
        }
    }
}

impl TryFrom<char> for Shading {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            's' => Ok(Shading::Solid),
            'p' => Ok(Shading::Striped),
            'b' => Ok(Shading::Open),
            _ => Err(CardError::Code { attribute: "shading", code: c }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Red,
    Purple,
    Green,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Purple, Color::Green];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Purple => 'p',
            Color::Green => 'g',
        }
    }

    pub fn from_index(index: u8) -> Result<Self, CardError> {
        match index {
            0 => Ok(Color::Red),
            1 => Ok(Color::Purple),
            2 => Ok(Color::Green),
            _ => Err(CardError::Index { attribute: "color", index }),
        }
    }
}

impl TryFrom<char> for Color {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'r' => Ok(Color::Red),
            'p' => Ok(Color::Purple),
            'g' => Ok(Color::Green),
            _ => Err(CardError::Code { attribute: "color", code: c }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    Diamond,
    Squiggle,
    Oval,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Diamond, Shape::Squiggle, Shape::Oval];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Shape::Diamond => 'd',
            Shape::Squiggle => 's',
            Shape::Oval => 'o',
        }
    }

    pub fn from_index(index: u8) -> Result<Self, CardError> {
        match index {
            0 => Ok(Shape::Diamond),
            1 => Ok(Shape::Squiggle),
            2 => Ok(Shape::Oval),
            _ => Err(CardError::Index { attribute: "shape", index }),
        }
    }
}

impl TryFrom<char> for Shape {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'd' => Ok(Shape::Diamond),
            's' => Ok(Shape::Squiggle),
            'o' => Ok(Shape::Oval),
            _ => Err(CardError::Code { attribute: "shape", code: c }),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error("invalid count: {0}")]
    Count(u8),
    #[error("unknown {attribute} code: '{code}'")]
    Code { attribute: &'static str, code: char },
    #[error("{attribute} index out of range: {index}")]
    Index { attribute: &'static str, index: u8 },
}

/// A Set card: four independent attributes with three values each.
///
/// The text form is four characters (count digit, then shading, color and
/// shape codes); the byte form packs each attribute index into two bits.
///
/// ```
/// use set_rs::cards::{Card, Color, Count, Shading, Shape};
///
/// let card = Card::new(Count::Two, Shading::Striped, Color::Green, Shape::Oval);
/// assert_eq!(card.to_string(), "2pgo");
/// assert_eq!(Card::from_byte(card.to_byte()).unwrap(), card);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    count: Count,
    shading: Shading,
    color: Color,
    shape: Shape,
}

impl Card {
    pub const fn new(count: Count, shading: Shading, color: Color, shape: Shape) -> Self {
        Self { count, shading, color, shape }
    }

    /// Build a card from attribute indices in `count, shading, color, shape` order.
    pub fn from_indices(indices: [u8; 4]) -> Result<Self, CardError> {
        Ok(Self {
            count: Count::from_index(indices[0])?,
            shading: Shading::from_index(indices[1])?,
            color: Color::from_index(indices[2])?,
            shape: Shape::from_index(indices[3])?,
        })
    }

    pub const fn count(self) -> Count {
        self.count
    }
    pub const fn shading(self) -> Shading {
        self.shading
    }
    pub const fn color(self) -> Color {
        self.color
    }
    pub const fn shape(self) -> Shape {
        self.shape
    }

    pub const fn indices(self) -> [u8; 4] {
        [self.count.index(), self.shading.index(), self.color.index(), self.shape.index()]
    }

    pub const fn to_byte(self) -> u8 {
        self.count.index() << 6
            | self.shading.index() << 4
            | self.color.index() << 2
            | self.shape.index()
    }

    pub fn from_byte(byte: u8) -> Result<Self, CardError> {
        Self::from_indices([byte >> 6 & 0b11, byte >> 4 & 0b11, byte >> 2 & 0b11, byte & 0b11])
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.count.to_char(),
            self.shading.to_char(),
            self.color.to_char(),
            self.shape.to_char()
        )
    }
}

impl FromStr for Card {
    type Err = CardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let chars: Vec<char> = t.chars().collect();
        let &[count, shading, color, shape] = chars.as_slice() else {
            return Err(CardError::Invalid(s.to_string()));
        };
        Ok(Card::new(
            Count::try_from(count)?,
            Shading::try_from(shading.to_ascii_lowercase())?,
            Color::try_from(color.to_ascii_lowercase())?,
            Shape::try_from(shape.to_ascii_lowercase())?,
        ))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use set_rs::cards::parse_cards;
///
/// let cards = parse_cards("1srd, 2srd 3srd").unwrap();
/// assert_eq!(cards.len(), 3);
/// assert_eq!(cards[2].to_string(), "3srd");
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
