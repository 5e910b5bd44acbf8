mod interpolation_tests;
mod variant_tests;
