mod transform_test;
