mod normalizer_test;
