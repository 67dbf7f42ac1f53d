#[macro_export]
macro_rules! drop_table {
    ($table:ident, $manager:ident) => {
        $manager
            .drop_table(Table::drop().table($table::Table).to_owned())
            .await?
    };
}

#[macro_export]
macro_rules! points_column {
    ($column:expr) => {
        ColumnDef::new($column).integer().not_null().default(0)
    };
}

pub(crate) use drop_table;
pub(crate) use points_column;
