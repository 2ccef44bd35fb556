//! The fixed queries sent to a Kiwi server.
//!
//! Each query is a GraphQL document holding a single named operation. The same document is
//! posted as a [`cynic::Operation`] and parsed with `cynic_parser` to check it against the
//! introspected schema.

use std::borrow::Cow;

use cynic::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Query {
    pub operation_name: &'static str,
    pub document: &'static str,
}

impl Query {
    /// The request body for this query. It takes no variables.
    ///
    /// Responses are decoded as plain JSON, the fragment type only tags the operation.
    pub fn operation(&self) -> Operation<String, ()> {
        let mut operation = Operation::new(self.document.to_owned(), ());
        operation.operation_name = Some(Cow::Borrowed(self.operation_name));
        operation
    }
}

pub(crate) const ACTIVITIES: Query = Query {
    operation_name: "Activities",
    document: r#"query Activities {
  current {
    name
    description
    author {
      name
    }
    location {
      address
    }
  }
}
"#,
};

pub(crate) const REGISTRATIONS: Query = Query {
    operation_name: "Registrations",
    document: r#"query Registrations {
  current {
    name
    registrations {
      created
      deleted
    }
  }
}
"#,
};

pub(crate) const USER_RELATIONS: Query = Query {
    operation_name: "UserRelations",
    document: r#"query UserRelations {
  user {
    relations {
      group {
        name
      }
    }
  }
}
"#,
};

pub(crate) const USER_REGISTRATIONS: Query = Query {
    operation_name: "UserRegistrations",
    document: r#"query UserRegistrations {
  user {
    registrations {
      activity {
        name
        start
      }
      option {
        price
      }
    }
  }
}
"#,
};

pub(crate) const ADMIN_FLAG: Query = Query {
    operation_name: "AdminFlag",
    document: r#"query AdminFlag {
  user {
    isAdmin
  }
}
"#,
};

pub(crate) const GROUPS: Query = Query {
    operation_name: "Groups",
    document: r#"query Groups {
  groups {
    name
  }
}
"#,
};
