/// Trait for types that can provide column values
pub trait GetColumnValue {
    type Column;

    fn get_column_value(&self, column: &Self::Column) -> String;
}

/// Output format configuration
#[derive(Clone, Debug)]
pub struct OutputFormat {
    pub raw: bool,
}

/// Build table rows from items and columns
pub fn build_table_data<T>(items: &[T], columns: &[T::Column]) -> Vec<Vec<String>>
where
    T: GetColumnValue,
{
    items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|col| item.get_column_value(col))
                .collect()
        })
        .collect()
}

impl OutputFormat {
    pub fn new(raw: bool) -> Self {
        Self { raw }
    }

    /// Render tabular data - either raw (tab-separated) or column-aligned
    pub fn render_table<T>(&self, data: &[Vec<T>]) -> String
    where
        T: AsRef<str>,
    {
        if self.raw {
            data.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.as_ref())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            Self::render_aligned(data)
        }
    }

    /// Print tabular data; formatted output gets a header row, raw output does not
    pub fn print_table<T>(&self, headers: &[&str], data: &[Vec<T>])
    where
        T: AsRef<str>,
    {
        if data.is_empty() {
            return;
        }

        let rendered = if self.raw {
            self.render_table(data)
        } else {
            let mut rows: Vec<Vec<&str>> = vec![headers.to_vec()];
            rows.extend(data.iter().map(|row| row.iter().map(|c| c.as_ref()).collect()));
            Self::render_aligned(&rows)
        };
        println!("{rendered}");
    }

    /// Print key-value pairs
    pub fn print_key_value<K, V>(&self, pairs: &[(K, V)])
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let data: Vec<Vec<&str>> = pairs
            .iter()
            .map(|(k, v)| vec![k.as_ref(), v.as_ref()])
            .collect();

        if !data.is_empty() {
            println!("{}", self.render_table(&data));
        }
    }

    fn render_aligned<T>(data: &[Vec<T>]) -> String
    where
        T: AsRef<str>,
    {
        // Column widths in characters, like `column -t`
        let num_cols = data.iter().map(Vec::len).max().unwrap_or(0);
        let mut col_widths = vec![0; num_cols];

        for row in data {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.as_ref().chars().count());
            }
        }

        data.iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        if i + 1 == row.len() {
                            cell.as_ref().to_string()
                        } else {
                            format!("{:<width$}", cell.as_ref(), width = col_widths[i])
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
