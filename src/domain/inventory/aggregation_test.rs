#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::domain::foundation::{Metric, Period, PeriodNaming};
    use crate::domain::inventory::aggregation::{gross, gross_summary};
    use crate::domain::inventory::resolver::ColumnResolver;
    use crate::domain::table::StockTable;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn resolver() -> ColumnResolver {
        ColumnResolver::new(PeriodNaming::Abbreviated)
    }

    fn three_site_table() -> StockTable {
        StockTable::from_rows(vec![
            row(&[
                "Material",
                "Code",
                "CliffordRd_Rolls Jan",
                "KPark_Rolls Jan",
                "HarrisDrive_Rolls Jan",
                "SquareArea Jan",
                "KPark_SquareArea Feb",
                "HarrisDrive_SquareArea Jan",
            ]),
            row(&["M1", "C1", "100", "1,250", "", "10", "7", "2.5"]),
            row(&["M2", "C2", "abc", "5", "3", "", "", ""]),
            row(&["M3", "C3"]),
        ])
        .unwrap()
    }

    #[test]
    fn single_record_single_site() {
        let table = StockTable::from_rows(vec![
            row(&["Material", "CliffordRd_Rolls Jan"]),
            row(&["M1", "100"]),
        ])
        .unwrap();

        let totals = gross(&table, &resolver(), Metric::Rolls, Period::January);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals["M1"], 100.0);
    }

    #[test]
    fn sums_across_sites_with_tolerant_parsing() {
        let totals = gross(&three_site_table(), &resolver(), Metric::Rolls, Period::January);
        assert_eq!(totals["M1"], 1350.0);
        assert_eq!(totals["M2"], 8.0);
        assert_eq!(totals["M3"], 0.0);
    }

    #[test]
    fn area_totals_use_legacy_and_exception_columns() {
        let table = three_site_table();
        let jan = gross(&table, &resolver(), Metric::SquareArea, Period::January);
        assert_eq!(jan["M1"], 12.5);

        let feb = gross(&table, &resolver(), Metric::SquareArea, Period::February);
        assert_eq!(feb["M1"], 7.0);
    }

    #[test]
    fn kpark_feb_exception_applies_under_full_naming() {
        let table = StockTable::from_rows(vec![
            row(&["Material", "KPark_SquareArea Feb", "HarrisDrive_SquareArea February"]),
            row(&["M1", "4", "6"]),
        ])
        .unwrap();
        let resolver = ColumnResolver::new(PeriodNaming::Full);

        let totals = gross(&table, &resolver, Metric::SquareArea, Period::February);
        assert_eq!(totals["M1"], 10.0);
    }

    #[test]
    fn missing_metric_columns_total_zero() {
        let totals = gross(&three_site_table(), &resolver(), Metric::Pallets, Period::January);
        assert!(totals.values().all(|&v| v == 0.0));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn bad_cell_does_not_contaminate_other_materials() {
        let totals = gross(&three_site_table(), &resolver(), Metric::Rolls, Period::January);
        // M2's "abc" contributes zero; M1 is unaffected.
        assert_eq!(totals["M1"], 1350.0);
        assert_eq!(totals["M2"], 8.0);
    }

    #[test]
    fn duplicate_material_keys_accumulate() {
        let table = StockTable::from_rows(vec![
            row(&["Material", "KPark_Rolls Jan"]),
            row(&["M1", "2"]),
            row(&["M1", "3"]),
            row(&["", "99"]),
        ])
        .unwrap();
        let totals = gross(&table, &resolver(), Metric::Rolls, Period::January);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["M1"], 5.0);
    }

    #[test]
    fn summary_reports_every_metric_in_table_order() {
        let summary = gross_summary(&three_site_table(), &resolver(), Period::January);

        assert_eq!(summary.period, Period::January);
        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].material, "M1");
        assert_eq!(summary.rows[0].code, "C1");
        assert_eq!(summary.rows[0].totals.get(Metric::Rolls), 1350.0);
        assert_eq!(summary.rows[0].totals.get(Metric::SquareArea), 12.5);
        assert_eq!(summary.rows[0].totals.get(Metric::SlitRolls), 0.0);
        assert_eq!(summary.rows[2].material, "M3");
    }

    #[test]
    fn summary_serializes_flat_camel_case() {
        let summary = gross_summary(&three_site_table(), &resolver(), Period::January);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["period"], "January");
        assert_eq!(json["rows"][0]["slitRolls"], 0.0);
        assert_eq!(json["rows"][0]["squareArea"], 12.5);
    }

    fn shuffled_table(values: &[(u32, u32, u32)], order: &[usize]) -> StockTable {
        let base = [
            "Material",
            "CliffordRd_Rolls Jan",
            "KPark_Rolls Jan",
            "HarrisDrive_Rolls Jan",
        ];
        let header: Vec<String> = order.iter().map(|&i| base[i].to_string()).collect();
        let mut rows = vec![header];
        for (idx, (a, b, c)) in values.iter().enumerate() {
            let cells = [format!("M{}", idx), a.to_string(), b.to_string(), c.to_string()];
            rows.push(order.iter().map(|&i| cells[i].clone()).collect());
        }
        StockTable::from_rows(rows).unwrap()
    }

    proptest! {
        #[test]
        fn column_order_does_not_change_totals(
            values in proptest::collection::vec((0u32..10_000, 0u32..10_000, 0u32..10_000), 1..8),
            order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        ) {
            let canonical = shuffled_table(&values, &[0, 1, 2, 3]);
            let permuted = shuffled_table(&values, &order);

            let expected = gross(&canonical, &resolver(), Metric::Rolls, Period::January);
            let actual = gross(&permuted, &resolver(), Metric::Rolls, Period::January);

            prop_assert_eq!(&expected, &actual);
            for (idx, (a, b, c)) in values.iter().enumerate() {
                let total = expected[&format!("M{}", idx)];
                prop_assert_eq!(total, f64::from(*a) + f64::from(*b) + f64::from(*c));
            }
        }

        #[test]
        fn arbitrary_cell_text_never_breaks_aggregation(cells in proptest::collection::vec(".*", 3)) {
            let table = StockTable::from_rows(vec![
                row(&["Material", "CliffordRd_Rolls Jan", "KPark_Rolls Jan", "HarrisDrive_Rolls Jan"]),
                vec!["M1".to_string(), cells[0].clone(), cells[1].clone(), cells[2].clone()],
                row(&["M2", "1", "2", "3"]),
            ]).unwrap();

            let totals = gross(&table, &resolver(), Metric::Rolls, Period::January);
            prop_assert!(totals["M1"].is_finite());
            prop_assert_eq!(totals["M2"], 6.0);
        }
    }
}
