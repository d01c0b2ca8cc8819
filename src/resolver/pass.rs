/// How a tag expression is matched against catalog metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// Jamendo `tags`: every `+`-joined term must match.
    Exact,
    /// Jamendo `fuzzytags`: terms match loosely.
    Fuzzy,
}

impl TagMatch {
    pub fn query_param(self) -> &'static str {
        match self {
            TagMatch::Exact => "tags",
            TagMatch::Fuzzy => "fuzzytags",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popularity {
    Week,
    Month,
    Total,
}

impl Popularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Popularity::Week => "popularity_week",
            Popularity::Month => "popularity_month",
            Popularity::Total => "popularity_total",
        }
    }
}

impl std::fmt::Display for Popularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPass {
    pub tag_expression: String,
    pub tag_match: TagMatch,
    pub order_by: Popularity,
    pub boost: Option<Popularity>,
    pub result_limit: usize,
}

impl std::fmt::Display for SearchPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={} order={} limit={}",
            self.tag_match.query_param(),
            self.tag_expression,
            self.order_by,
            self.result_limit
        )?;
        if let Some(boost) = self.boost {
            write!(f, " boost={}", boost)?;
        }
        Ok(())
    }
}
