use serde::{Serialize, Serializer};
use std::fmt;

pub const USER_PREFIX: &str = "user_";
pub const PRODUCT_PREFIX: &str = "product_";

/// Raw user key as it appears in the interaction source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

/// Raw product key as it appears in the interaction and product sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_raw(&self) -> &str {
        &self.0
    }
}

impl ProductId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_raw(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", USER_PREFIX, self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PRODUCT_PREFIX, self.0)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Graph node key. The role is part of the key, so `User("1")` and
/// `Product("1")` are distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    User(UserId),
    Product(ProductId),
}

impl NodeId {
    pub fn as_user(&self) -> Option<&UserId> {
        match self {
            NodeId::User(id) => Some(id),
            NodeId::Product(_) => None,
        }
    }

    pub fn as_product(&self) -> Option<&ProductId> {
        match self {
            NodeId::Product(id) => Some(id),
            NodeId::User(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::User(id) => id.fmt(f),
            NodeId::Product(id) => id.fmt(f),
        }
    }
}

impl From<UserId> for NodeId {
    fn from(id: UserId) -> Self {
        NodeId::User(id)
    }
}

impl From<ProductId> for NodeId {
    fn from(id: ProductId) -> Self {
        NodeId::Product(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAttributes {
    pub category: String,
    pub price_range: String,
    pub brand: String,
}

impl ProductAttributes {
    pub fn new(
        category: impl Into<String>,
        price_range: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            price_range: price_range.into(),
            brand: brand.into(),
        }
    }
}

/// One validated row of the interaction source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub user: UserId,
    pub product: ProductId,
}

impl InteractionRecord {
    pub fn new(user: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            user: UserId::new(user),
            product: ProductId::new(product),
        }
    }
}

/// One validated row of the product source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub product: ProductId,
    pub attributes: ProductAttributes,
}

impl ProductRecord {
    pub fn new(product: impl Into<String>, attributes: ProductAttributes) -> Self {
        Self {
            product: ProductId::new(product),
            attributes,
        }
    }
}
