//! Static description of the tables the migration owns, and their DDL.

/// A table to create, with its columns in declaration order.
pub struct Table {
    pub name: &'static str,
    columns: Vec<Column>,
    indexes: Vec<Index>,
}

pub struct Column {
    name: &'static str,
    sql_type: &'static str,
    role: ColumnRole,
    default: Option<&'static str>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    Key,
    Required,
    Optional,
}

/// Secondary index. Uniqueness lives here rather than on columns.
pub struct Index {
    columns: Vec<&'static str>,
    unique: bool,
}

impl Table {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// `CREATE TABLE` followed by one `CREATE INDEX` per index.
    pub fn create_ddls(&self, schema: &str) -> Vec<String> {
        let columns = self
            .columns
            .iter()
            .map(Column::ddl)
            .collect::<Vec<_>>()
            .join(",\n    ");
        let keys = self
            .columns
            .iter()
            .filter(|column| column.role == ColumnRole::Key)
            .map(|column| quoted(column.name))
            .collect::<Vec<_>>()
            .join(",");

        let mut ddls = vec![format!(
            "CREATE TABLE {}.{} (\n    {},\n    PRIMARY KEY({})\n)",
            quoted(schema),
            quoted(self.name),
            columns,
            keys
        )];
        ddls.extend(self.indexes.iter().map(|index| index.ddl(schema, self.name)));
        ddls
    }
}

impl Column {
    pub fn key(name: &'static str, sql_type: &'static str) -> Self {
        Self::with_role(name, sql_type, ColumnRole::Key)
    }

    pub fn required(name: &'static str, sql_type: &'static str) -> Self {
        Self::with_role(name, sql_type, ColumnRole::Required)
    }

    pub fn optional(name: &'static str, sql_type: &'static str) -> Self {
        Self::with_role(name, sql_type, ColumnRole::Optional)
    }

    /// Raw SQL expression, emitted as is.
    pub fn default_to(mut self, expression: &'static str) -> Self {
        self.default = Some(expression);
        self
    }

    fn with_role(name: &'static str, sql_type: &'static str, role: ColumnRole) -> Self {
        Self {
            name,
            sql_type,
            role,
            default: None,
        }
    }

    fn ddl(&self) -> String {
        let mut sql = format!("{} {}", quoted(self.name), self.sql_type);
        if self.role == ColumnRole::Required {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        sql
    }
}

impl Index {
    pub fn unique(columns: Vec<&'static str>) -> Self {
        Self {
            columns,
            unique: true,
        }
    }

    pub fn lookup(columns: Vec<&'static str>) -> Self {
        Self {
            columns,
            unique: false,
        }
    }

    fn ddl(&self, schema: &str, table: &str) -> String {
        let name = format!("{}_{}_idx", table, self.columns.join("_"));
        let columns = self
            .columns
            .iter()
            .map(|column| quoted(column))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE {}INDEX {} ON {}.{} ({})",
            if self.unique { "UNIQUE " } else { "" },
            quoted(&name),
            quoted(schema),
            quoted(table),
            columns
        )
    }
}

fn quoted(identifier: &str) -> String {
    format!("\"{identifier}\"")
}
